//! Roster value type and loading abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;

/// An immutable, ordered list of candidate names.
///
/// Cloning is cheap: the names are shared behind an `Arc`. Duplicate names
/// are kept and treated as distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Arc<[String]>,
}

impl Roster {
    /// Creates a roster from any sequence of names, preserving order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a roster with no names.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    /// Returns the names in roster order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when the roster has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Clamps a requested pick count into `[1, len]`.
    ///
    /// An empty roster still yields `1`; such a roster can never be drawn from.
    #[must_use]
    pub fn clamp_pick_count(&self, requested: usize) -> usize {
        requested.clamp(1, self.len().max(1))
    }

    /// Returns how many names a draw with `pick_count` actually yields.
    #[must_use]
    pub fn effective_count(&self, pick_count: usize) -> usize {
        pick_count.min(self.len())
    }
}

impl From<Vec<String>> for Roster {
    fn from(names: Vec<String>) -> Self {
        Self {
            names: names.into(),
        }
    }
}

/// Source the roster is loaded from at startup.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Load the full roster.
    async fn load_roster(&self) -> Result<Roster, DomainError>;
}
