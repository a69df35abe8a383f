//! Plain value-type configuration for the tick scheduler, ingress queue,
//! and judge sampling, each with an explicit `validate()`.
//!
//! Grounded on `murk-engine::config::WorldConfig`/`ConfigError`: struct +
//! validate, no config-file parsing crate.

use std::error::Error;
use std::fmt;

/// Ticks-per-second the scheduler's background loop should aim for.
/// `0` disables auto-advance (manual `tick()` calls only).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickRate(pub u32);

impl TickRate {
    /// Manual stepping only, no background loop.
    pub const MANUAL: Self = Self(0);

    /// Validate (always succeeds; every `u32` is a legal rate).
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Capacity of the bounded command queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngressCapacity(pub usize);

impl IngressCapacity {
    /// Matches the Go source's `commandQueue` buffer size.
    pub const DEFAULT: Self = Self(crate::command_queue::DEFAULT_CAPACITY);

    /// A zero-capacity queue can never accept a command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0 == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Judge sampling configuration: the XZ chunk rectangle, total ticks, and
/// sample interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleConfig {
    /// Inclusive lower chunk X.
    pub x1: i32,
    /// Inclusive lower chunk Z.
    pub z1: i32,
    /// Exclusive upper chunk X.
    pub x2: i32,
    /// Exclusive upper chunk Z.
    pub z2: i32,
    /// Total ticks to step.
    pub ticks: u64,
    /// Sample every `sample_interval` ticks.
    pub sample_interval: u64,
}

impl SampleConfig {
    /// Validate the rectangle is non-empty and the interval is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x2 <= self.x1 || self.z2 <= self.z1 {
            return Err(ConfigError::EmptyRectangle {
                x1: self.x1,
                z1: self.z1,
                x2: self.x2,
                z2: self.z2,
            });
        }
        if self.sample_interval == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(())
    }
}

/// Errors from validating a configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An `IngressCapacity` of zero was supplied.
    ZeroCapacity,
    /// A judge sample rectangle with `x2 <= x1` or `z2 <= z1`.
    EmptyRectangle {
        /// Inclusive lower chunk X.
        x1: i32,
        /// Inclusive lower chunk Z.
        z1: i32,
        /// Exclusive upper chunk X.
        x2: i32,
        /// Exclusive upper chunk Z.
        z2: i32,
    },
    /// A `sample_interval` of zero, which would sample every tick forever
    /// without ever completing a count.
    ZeroSampleInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "ingress capacity must be nonzero"),
            Self::EmptyRectangle { x1, z1, x2, z2 } => write!(
                f,
                "sample rectangle ({x1},{z1})..({x2},{z2}) is empty or inverted"
            ),
            Self::ZeroSampleInterval => write!(f, "sample_interval must be nonzero"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            IngressCapacity(0).validate().unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[test]
    fn default_capacity_validates() {
        IngressCapacity::DEFAULT.validate().unwrap();
    }

    #[test]
    fn inverted_rectangle_is_rejected() {
        let cfg = SampleConfig {
            x1: 5,
            z1: 0,
            x2: 5,
            z2: 10,
            ticks: 100,
            sample_interval: 10,
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyRectangle { .. })
        ));
    }

    #[test]
    fn zero_sample_interval_is_rejected() {
        let cfg = SampleConfig {
            x1: 0,
            z1: 0,
            x2: 10,
            z2: 10,
            ticks: 100,
            sample_interval: 0,
        };
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::ZeroSampleInterval);
    }
}
