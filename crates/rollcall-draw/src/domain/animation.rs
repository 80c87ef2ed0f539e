//! Timing of the draw animation.

use std::time::Duration;

use rollcall_core::error::DomainError;

/// Default delay between two animation ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Default total length of the animation.
pub const DEFAULT_DRAW_DURATION: Duration = Duration::from_millis(1500);

/// Cadence and length of the "spinning" phase of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    tick_interval: Duration,
    total_ticks: u32,
}

impl AnimationConfig {
    /// Builds a config from a tick interval and a total duration.
    ///
    /// The tick count is `duration / interval`, never less than one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `tick_interval` is zero.
    pub fn new(tick_interval: Duration, draw_duration: Duration) -> Result<Self, DomainError> {
        if tick_interval.is_zero() {
            return Err(DomainError::Validation(
                "tick interval must be greater than zero".to_owned(),
            ));
        }
        let ticks = (draw_duration.as_nanos() / tick_interval.as_nanos()).max(1);
        Ok(Self {
            tick_interval,
            total_ticks: u32::try_from(ticks).unwrap_or(u32::MAX),
        })
    }

    /// Delay between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Number of ticks a draw runs before settling.
    #[must_use]
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            total_ticks: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_thirty_ticks_of_fifty_ms() {
        let config = AnimationConfig::default();

        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.total_ticks(), 30);
        assert_eq!(
            config,
            AnimationConfig::new(DEFAULT_TICK_INTERVAL, DEFAULT_DRAW_DURATION).unwrap()
        );
    }

    #[test]
    fn test_new_rounds_tick_count_down() {
        let config =
            AnimationConfig::new(Duration::from_millis(40), Duration::from_millis(130)).unwrap();

        assert_eq!(config.total_ticks(), 3);
    }

    #[test]
    fn test_new_always_has_at_least_one_tick() {
        let config =
            AnimationConfig::new(Duration::from_millis(100), Duration::from_millis(10)).unwrap();

        assert_eq!(config.total_ticks(), 1);
    }

    #[test]
    fn test_new_rejects_zero_interval() {
        let result = AnimationConfig::new(Duration::ZERO, Duration::from_millis(100));

        match result {
            Err(DomainError::Validation(msg)) => {
                assert_eq!(msg, "tick interval must be greater than zero");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
