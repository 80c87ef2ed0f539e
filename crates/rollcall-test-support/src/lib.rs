//! Shared test mocks and utilities for the Rollcall name drawing engine.

mod clock;
mod rng;
mod roster;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use roster::{FailingRosterSource, StaticRosterSource, lettered_roster, numbered_roster};
