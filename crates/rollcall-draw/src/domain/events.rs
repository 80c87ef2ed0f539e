//! Domain events for the Draw context.

use chrono::{DateTime, Utc};
use rollcall_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when a draw enters the running phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStarted {
    /// The draw identifier.
    pub draw_id: Uuid,
    /// Number of names each tick samples.
    pub effective_count: usize,
    /// Number of ticks before the draw settles.
    pub total_ticks: u32,
}

/// Emitted on every animation tick with the selection now on display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTicked {
    /// The draw identifier.
    pub draw_id: Uuid,
    /// 1-based tick number.
    pub tick: u32,
    /// The intermediate selection.
    pub selection: Vec<String>,
}

/// Emitted when the last tick commits the draw result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSettled {
    /// The draw identifier.
    pub draw_id: Uuid,
    /// The committed names, in selection order.
    pub names: Vec<String>,
    /// Number of names drawn.
    pub drawn_count: usize,
    /// When the draw completed.
    pub completed_at: DateTime<Utc>,
}

/// Emitted when a running draw is torn down before settling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCancelled {
    /// The draw identifier.
    pub draw_id: Uuid,
    /// Ticks that had fired before cancellation.
    pub ticks_elapsed: u32,
}

/// Emitted when the pick count changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickCountChanged {
    /// The count the caller asked for.
    pub requested: usize,
    /// The count after clamping.
    pub effective: usize,
}

/// Emitted when hide mode is switched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideModeChanged {
    /// Whether names are now masked.
    pub hide_names: bool,
}

/// Emitted the first time a drawn name is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRevealed {
    /// The revealed name.
    pub name: String,
}

/// Event payload variants for the Draw context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawEventKind {
    /// A draw has started.
    DrawStarted(DrawStarted),
    /// An animation tick has replaced the displayed selection.
    SelectionTicked(SelectionTicked),
    /// A draw has settled on its result.
    DrawSettled(DrawSettled),
    /// A draw was cancelled.
    DrawCancelled(DrawCancelled),
    /// The pick count has changed.
    PickCountChanged(PickCountChanged),
    /// Hide mode has been switched.
    HideModeChanged(HideModeChanged),
    /// A drawn name has been revealed.
    NameRevealed(NameRevealed),
}

/// Domain event envelope for the Draw context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: DrawEventKind,
}

impl DrawEventKind {
    /// Routing name of this payload variant.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DrawStarted(_) => "draw.started",
            Self::SelectionTicked(_) => "draw.selection_ticked",
            Self::DrawSettled(_) => "draw.settled",
            Self::DrawCancelled(_) => "draw.cancelled",
            Self::PickCountChanged(_) => "draw.pick_count_changed",
            Self::HideModeChanged(_) => "draw.hide_mode_changed",
            Self::NameRevealed(_) => "draw.name_revealed",
        }
    }
}

impl DomainEvent for DrawEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("DrawEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use rollcall_core::clock::Clock;
    use rollcall_test_support::FixedClock;

    use super::*;

    fn settled_event() -> DrawEvent {
        let kind = DrawEventKind::DrawSettled(DrawSettled {
            draw_id: Uuid::nil(),
            names: vec!["Ada".to_owned(), "Grace".to_owned()],
            drawn_count: 2,
            completed_at: FixedClock::reference().now(),
        });
        DrawEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                session_id: Uuid::new_v4(),
                sequence_number: 3,
                correlation_id: Uuid::new_v4(),
                occurred_at: FixedClock::reference().now(),
            },
            kind,
        }
    }

    #[test]
    fn test_payload_is_tagged_by_variant() {
        let payload = settled_event().to_payload();

        assert_eq!(payload["DrawSettled"]["drawn_count"], 2);
        assert_eq!(
            payload["DrawSettled"]["names"],
            serde_json::json!(["Ada", "Grace"])
        );
    }

    #[test]
    fn test_metadata_type_matches_kind() {
        let event = settled_event();

        assert_eq!(event.metadata().event_type, event.event_type());
        assert_eq!(event.event_type(), "draw.settled");
    }
}
