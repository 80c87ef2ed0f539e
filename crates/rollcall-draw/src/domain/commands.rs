//! Commands for the Draw context.

use rollcall_core::command::Command;
use uuid::Uuid;

/// Command to start a new draw.
#[derive(Debug, Clone)]
pub struct StartDraw {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartDraw {
    fn command_type(&self) -> &'static str {
        "draw.start_draw"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to stop the animation of an in-flight draw.
#[derive(Debug, Clone)]
pub struct StopDraw {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StopDraw {
    fn command_type(&self) -> &'static str {
        "draw.stop_draw"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to change how many names the next draw picks.
#[derive(Debug, Clone)]
pub struct SetPickCount {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Requested count; clamped to the roster bounds.
    pub pick_count: usize,
}

impl Command for SetPickCount {
    fn command_type(&self) -> &'static str {
        "draw.set_pick_count"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to switch hide mode on or off.
#[derive(Debug, Clone)]
pub struct SetHideMode {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Whether drawn names should be masked.
    pub hide_names: bool,
}

impl Command for SetHideMode {
    fn command_type(&self) -> &'static str {
        "draw.set_hide_mode"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to unmask one drawn name while hide mode is on.
#[derive(Debug, Clone)]
pub struct RevealName {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The drawn name to reveal.
    pub name: String,
}

impl Command for RevealName {
    fn command_type(&self) -> &'static str {
        "draw.reveal_name"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
