//! Commands accepted by a draw session.

use uuid::Uuid;

/// A request to change session state.
///
/// The correlation id is copied into every event the command produces, so a
/// subscriber can tie a `draw.settled` back to the start that caused it.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name used in logs, e.g. `draw.start_draw`.
    fn command_type(&self) -> &'static str;

    /// Identifier shared by the command and its events.
    fn correlation_id(&self) -> Uuid;
}
