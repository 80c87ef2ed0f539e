//! Wall-clock source for draw timestamps.

use chrono::{DateTime, Utc};

/// Supplies the current time for event metadata and the last-draw timestamp.
///
/// Draw timing itself runs on the tokio timer; this clock only stamps what
/// happened.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host's system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
