//! Scripted RNGs for draw tests.

use rollcall_core::rng::DeterministicRng;

/// Always picks the lowest value in range, so every sampling step takes the
/// first slot of the remaining pool.
///
/// Over a roster `A..E` with two picks this yields `[A, E]`: slot 0 is taken
/// and the last entry is swapped into its place.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a fixed script of picks, one per call.
///
/// Each scripted value is clamped into the requested range, so a script
/// written for a full pool stays valid as the pool shrinks.
///
/// # Panics
///
/// Panics when asked for more values than the script holds.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    script: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    /// Creates an RNG that replays `script` in order.
    #[must_use]
    pub fn new(script: Vec<u32>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of scripted values handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_scripted(&mut self) -> u32 {
        let Some(&value) = self.script.get(self.cursor) else {
            panic!(
                "SequenceRng script exhausted after {} values",
                self.script.len()
            );
        };
        self.cursor += 1;
        value
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.next_scripted().clamp(min, max.max(min))
    }
}
