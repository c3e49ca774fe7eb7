//! Error types for timer configuration.
//!
//! All errors are configuration-time errors. Once a [`SysTime`](crate::SysTime)
//! or one of its layers has been built, every operation is infallible: the
//! arithmetic is unsigned modular arithmetic that is defined for every input.

use core::fmt;

/// Configuration error.
///
/// Returned by every constructor that accepts timer parameters. A rejected
/// configuration is never replaced with a default, since a silent default
/// (e.g. a zero divisor) would corrupt all downstream timekeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Hardware register width is 0 or wider than 32 bits
    InvalidBitWidth {
        /// Width that was requested
        bits: u32,
    },

    /// Tick multiplier is 0
    ZeroTickMultiplier,

    /// Ticks per millisecond is 0 (would divide by zero)
    ZeroTicksPerMs,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBitWidth { bits } => {
                write!(f, "Invalid timer bit width {} (expected 1-32)", bits)
            }
            ConfigError::ZeroTickMultiplier => write!(f, "Tick multiplier must be at least 1"),
            ConfigError::ZeroTicksPerMs => write!(f, "Ticks per millisecond must be at least 1"),
        }
    }
}

impl core::error::Error for ConfigError {}
