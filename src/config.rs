use std::time::Duration;
use thiserror::Error;

/// Length of a round.
pub const COUNTDOWN_SECS: u64 = 60;
/// How often the countdown fires.
pub const TICK_RATE_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("countdown duration must be greater than zero")]
    ZeroDuration,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("tick interval {tick:?} does not evenly divide countdown duration {total:?}")]
    UnevenTickInterval { total: Duration, tick: Duration },
}

/// Timing of a single countdown: its total length and how often it ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    total: Duration,
    tick_interval: Duration,
}

impl CountdownConfig {
    pub fn new(total: Duration, tick_interval: Duration) -> Result<Self, ConfigError> {
        if total.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if total.as_nanos() % tick_interval.as_nanos() != 0 {
            return Err(ConfigError::UnevenTickInterval {
                total,
                tick: tick_interval,
            });
        }
        Ok(Self {
            total,
            tick_interval,
        })
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn tick_count(&self) -> u128 {
        self.total.as_nanos() / self.tick_interval.as_nanos()
    }

    /// Time left once `elapsed` has passed, counted in whole tick intervals and clamped at zero.
    pub fn remaining_after(&self, elapsed: Duration) -> Duration {
        let interval = self.tick_interval.as_nanos();
        let consumed = (elapsed.as_nanos() / interval) * interval;
        let total = self.total.as_nanos();
        if consumed >= total {
            Duration::ZERO
        } else {
            // both operands fit in u64 nanos because total came from a Duration
            Duration::from_nanos((total - consumed) as u64)
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            total: Duration::from_secs(COUNTDOWN_SECS),
            tick_interval: Duration::from_millis(TICK_RATE_MS),
        }
    }
}

/// Everything the host hands to a new game session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub countdown: CountdownConfig,
    /// Fixed shuffle seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_countdown_is_one_minute_of_seconds() {
        let cfg = CountdownConfig::default();
        assert_eq!(cfg.total(), Duration::from_secs(60));
        assert_eq!(cfg.tick_interval(), Duration::from_secs(1));
        assert_eq!(cfg.tick_count(), 60);
    }

    #[test]
    fn rejects_zero_values() {
        assert_eq!(
            CountdownConfig::new(Duration::ZERO, Duration::from_secs(1)),
            Err(ConfigError::ZeroDuration)
        );
        assert_eq!(
            CountdownConfig::new(Duration::from_secs(10), Duration::ZERO),
            Err(ConfigError::ZeroTickInterval)
        );
    }

    #[test]
    fn rejects_uneven_tick_interval() {
        let err = CountdownConfig::new(Duration::from_secs(10), Duration::from_secs(3)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnevenTickInterval {
                total: Duration::from_secs(10),
                tick: Duration::from_secs(3),
            }
        );
        assert!(err.to_string().contains("does not evenly divide"));
    }

    #[test]
    fn accepts_sub_second_ticks() {
        let cfg = CountdownConfig::new(Duration::from_secs(2), Duration::from_millis(500)).unwrap();
        assert_eq!(cfg.tick_count(), 4);
    }

    #[test]
    fn remaining_is_counted_in_whole_ticks() {
        let cfg = CountdownConfig::default();
        assert_eq!(cfg.remaining_after(Duration::ZERO), Duration::from_secs(60));
        assert_eq!(
            cfg.remaining_after(Duration::from_millis(999)),
            Duration::from_secs(60)
        );
        assert_eq!(
            cfg.remaining_after(Duration::from_millis(1_001)),
            Duration::from_secs(59)
        );
        assert_eq!(
            cfg.remaining_after(Duration::from_secs(59)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn remaining_clamps_at_zero() {
        let cfg = CountdownConfig::default();
        assert_eq!(cfg.remaining_after(Duration::from_secs(60)), Duration::ZERO);
        assert_eq!(cfg.remaining_after(Duration::from_secs(3600)), Duration::ZERO);
    }

    #[test]
    fn default_game_config_has_no_seed() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.countdown, CountdownConfig::default());
    }
}
