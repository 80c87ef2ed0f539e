//! Uniform sampling without replacement.
//!
//! Both functions run a partial Fisher-Yates shuffle over a private working
//! copy: each step swap-removes a uniformly chosen element, so every ordered
//! selection of `k` distinct positions is equally likely. Results come back in
//! selection order.

use rollcall_core::rng::DeterministicRng;

/// Draws `min(count, len)` distinct positions from `0..len`.
///
/// Returns an empty vector when `len` or `count` is zero.
pub fn sample_indices(len: usize, count: usize, rng: &mut dyn DeterministicRng) -> Vec<usize> {
    let k = count.min(len);
    let mut pool: Vec<usize> = (0..len).collect();
    let mut picked = Vec::with_capacity(k);
    for _ in 0..k {
        let j = rng.next_index(pool.len());
        picked.push(pool.swap_remove(j));
    }
    picked
}

/// Draws `min(count, roster.len())` distinct entries from `roster`.
///
/// The input slice is never modified. Duplicate values in the roster are
/// distinct entries and may both be drawn.
pub fn sample<T: Clone>(roster: &[T], count: usize, rng: &mut dyn DeterministicRng) -> Vec<T> {
    sample_indices(roster.len(), count, rng)
        .into_iter()
        .map(|i| roster[i].clone())
        .collect()
}
