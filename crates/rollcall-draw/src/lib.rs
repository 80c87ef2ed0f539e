//! Rollcall: Draw bounded context.
//!
//! Responsible for sampling names from the roster without replacement,
//! running the timed "spinning" animation that settles on a final draw,
//! and tracking which drawn names have been revealed in hide mode.

pub mod application;
pub mod domain;
