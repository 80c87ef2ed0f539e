//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The roster has no names, so nothing can be drawn.
    #[error("roster is empty")]
    EmptyRoster,

    /// A name was referenced that is not part of the current draw result.
    #[error("name not in current draw: {0}")]
    NameNotDrawn(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (roster loading, poisoned locks).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
