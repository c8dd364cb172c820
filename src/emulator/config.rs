use crate::emulator::error::ConfigError;
use std::time::Duration;

/// Instructions per second unless told otherwise.
pub const DEFAULT_CLOCK_SPEED: u32 = 500;

/// One instruction per nanosecond, the finest period a `Duration` can hold.
pub const MAX_CLOCK_SPEED: u32 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    clock_speed: u32,
}

impl Config {
    pub fn new(clock_speed: u32) -> Result<Config, ConfigError> {
        if clock_speed == 0 {
            return Err(ConfigError::ZeroClockSpeed);
        }
        if clock_speed > MAX_CLOCK_SPEED {
            return Err(ConfigError::ClockSpeedTooHigh {
                speed: clock_speed,
                max: MAX_CLOCK_SPEED,
            });
        }
        Ok(Config { clock_speed })
    }

    /// Instructions executed per second.
    pub fn clock_speed(&self) -> u32 {
        self.clock_speed
    }

    /// Wall-clock duration of a single step.
    pub fn instruction_period(&self) -> Duration {
        Duration::from_secs(1) / self.clock_speed
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: DEFAULT_CLOCK_SPEED,
        }
    }
}
