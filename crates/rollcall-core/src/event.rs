//! Event envelope shared by everything a draw session emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope fields carried by every session event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique per event.
    pub event_id: Uuid,
    /// Dotted type name, also used as the SSE event name.
    pub event_type: String,
    /// The session that emitted the event.
    pub session_id: Uuid,
    /// Position in the session's event stream, starting at 1.
    pub sequence_number: i64,
    /// Copied from the command that caused the event.
    pub correlation_id: Uuid,
    /// When the event was recorded, from the session clock.
    pub occurred_at: DateTime<Utc>,
}

/// An event emitted by a draw session.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Dotted type name, e.g. `draw.settled`.
    fn event_type(&self) -> &'static str;

    /// The variant payload as JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Envelope fields.
    fn metadata(&self) -> &EventMetadata;
}
