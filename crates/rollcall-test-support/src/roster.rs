//! Test rosters: fixtures and mock `RosterSource` implementations.

use async_trait::async_trait;
use rollcall_core::error::DomainError;
use rollcall_core::roster::{Roster, RosterSource};

/// A roster source that hands out a fixed in-memory roster.
#[derive(Debug, Clone)]
pub struct StaticRosterSource(pub Roster);

#[async_trait]
impl RosterSource for StaticRosterSource {
    async fn load_roster(&self) -> Result<Roster, DomainError> {
        Ok(self.0.clone())
    }
}

/// A roster source that always returns an infrastructure error. Useful for
/// testing startup error paths.
#[derive(Debug)]
pub struct FailingRosterSource;

#[async_trait]
impl RosterSource for FailingRosterSource {
    async fn load_roster(&self) -> Result<Roster, DomainError> {
        Err(DomainError::Infrastructure("roster file unreadable".into()))
    }
}

/// Roster of single letters starting at `A`, e.g. `["A", "B", "C"]` for `3`.
///
/// # Panics
///
/// Panics if `len` exceeds 26.
#[must_use]
pub fn lettered_roster(len: usize) -> Roster {
    assert!(len <= 26, "lettered_roster supports at most 26 names");
    Roster::new((b'A'..).take(len).map(|c| char::from(c).to_string()))
}

/// Roster of `len` zero-padded member names, e.g. `"Member 07"`.
#[must_use]
pub fn numbered_roster(len: usize) -> Roster {
    Roster::new((1..=len).map(|i| format!("Member {i:02}")))
}
