//! Timer configuration.
//!
//! Two layers, mirroring how boards are usually described:
//! - `TimerPreset` is a trait of compile-time constants for a known timer
//!   setup (zero runtime cost, see the provided presets).
//! - `SysTimeConfig` is the runtime value actually handed to the counters. It
//!   can be built from a preset, by hand, or deserialized with the `serde`
//!   feature.

use crate::error::ConfigError;

/// Widest supported hardware register (the native counter width).
pub const NATIVE_BITS: u32 = u32::BITS;

/// Milliseconds per second, the fixed boundary of the seconds layer.
pub const MS_PER_SECOND: u32 = 1000;

/// How whole units are folded out of an elapsed window.
///
/// Both strategies produce bit-identical counter sequences for the same
/// input stream. Pick `Subtract` on cores without a hardware divider.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DivStrategy {
    /// One integer division per pass
    #[default]
    Divide,

    /// Repeated subtraction of 100-unit, 10-unit, then 1-unit chunks
    Subtract,
}

/// How `set()`/`adjust()` change the reported seconds.
///
/// The two modes are NOT equivalent; pick one per deployment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SecondsMode {
    /// Keep a separate offset added when seconds are reported.
    ///
    /// The free-running seconds counter is never touched.
    #[default]
    Offset,

    /// Rewrite the free-running seconds counter itself (wrapping).
    Direct,
}

/// Compile-time timer description.
///
/// All values are const. Implementations describe one hardware timer setup;
/// turn it into a runtime config with [`SysTimeConfig::from_preset`].
pub trait TimerPreset {
    /// Width of the hardware counter register in bits (1-32)
    const BIT_WIDTH: u32;

    /// Internal ticks added per hardware tick (at least 1)
    const TICK_MULTIPLIER: u32;

    /// Internal ticks per millisecond (at least 1)
    const TICKS_PER_MS: u32;
}

/// 1 MHz clock feeding a 16-bit timer.
///
/// - BIT_WIDTH: 16
/// - TICK_MULTIPLIER: 1
/// - TICKS_PER_MS: 1000
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timer1MHz16Bit;

impl TimerPreset for Timer1MHz16Bit {
    const BIT_WIDTH: u32 = 16;
    const TICK_MULTIPLIER: u32 = 1;
    const TICKS_PER_MS: u32 = 1000;
}

/// 10 MHz clock feeding a 32-bit timer.
///
/// Register is as wide as the native counter, so the widener is a direct
/// pass-through.
/// - BIT_WIDTH: 32
/// - TICK_MULTIPLIER: 1
/// - TICKS_PER_MS: 10000
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timer10MHz32Bit;

impl TimerPreset for Timer10MHz32Bit {
    const BIT_WIDTH: u32 = 32;
    const TICK_MULTIPLIER: u32 = 1;
    const TICKS_PER_MS: u32 = 10_000;
}

/// 11.0592 MHz (UART crystal) clock feeding a 16-bit timer.
///
/// 11059.2 hardware ticks per millisecond is not integral, so every hardware
/// tick counts as 10 internal ticks:
/// - BIT_WIDTH: 16
/// - TICK_MULTIPLIER: 10
/// - TICKS_PER_MS: 110592
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timer11MHz0592_16Bit;

impl TimerPreset for Timer11MHz0592_16Bit {
    const BIT_WIDTH: u32 = 16;
    const TICK_MULTIPLIER: u32 = 10;
    const TICKS_PER_MS: u32 = 110_592;
}

/// Runtime timer configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysTimeConfig {
    /// Width of the hardware counter register in bits (1-32)
    pub bit_width: u32,

    /// Internal ticks added per hardware tick
    pub tick_multiplier: u32,

    /// Internal ticks per millisecond
    pub ticks_per_ms: u32,

    /// Unit folding strategy
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: DivStrategy,

    /// Seconds set/adjust semantics
    #[cfg_attr(feature = "serde", serde(default))]
    pub seconds_mode: SecondsMode,
}

impl SysTimeConfig {
    /// Create a configuration with the default strategy and seconds mode.
    ///
    /// Not validated until it is used (or [`validate`](Self::validate) is called).
    pub const fn new(bit_width: u32, tick_multiplier: u32, ticks_per_ms: u32) -> Self {
        Self {
            bit_width,
            tick_multiplier,
            ticks_per_ms,
            strategy: DivStrategy::Divide,
            seconds_mode: SecondsMode::Offset,
        }
    }

    /// Create a configuration from a compile-time preset.
    pub const fn from_preset<P: TimerPreset>() -> Self {
        Self::new(P::BIT_WIDTH, P::TICK_MULTIPLIER, P::TICKS_PER_MS)
    }

    /// Select the unit folding strategy.
    pub const fn with_strategy(mut self, strategy: DivStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Select the seconds set/adjust semantics.
    pub const fn with_seconds_mode(mut self, mode: SecondsMode) -> Self {
        self.seconds_mode = mode;
        self
    }

    /// Check every field, reporting the first invalid one.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.bit_width == 0 || self.bit_width > NATIVE_BITS {
            return Err(ConfigError::InvalidBitWidth {
                bits: self.bit_width,
            });
        }
        if self.tick_multiplier == 0 {
            return Err(ConfigError::ZeroTickMultiplier);
        }
        if self.ticks_per_ms == 0 {
            return Err(ConfigError::ZeroTicksPerMs);
        }
        Ok(())
    }

    /// True when the register can be used directly as the wide tick counter.
    pub const fn is_pass_through(&self) -> bool {
        self.bit_width == NATIVE_BITS && self.tick_multiplier == 1
    }
}

impl Default for SysTimeConfig {
    fn default() -> Self {
        Self::from_preset::<Timer1MHz16Bit>()
    }
}
