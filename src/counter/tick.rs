//! Tick widener.
//!
//! Turns a narrow, wrapping hardware register into a free-running 32-bit
//! internal tick counter.

use crate::config::NATIVE_BITS;
use crate::error::ConfigError;
use crate::source::TimerSource;

/// Widens a `bit_width`-bit hardware register into a 32-bit tick counter.
///
/// Every [`sample`](Self::sample) reads the register once and adds
/// `multiplier * ((raw_now - last_raw) mod 2^bit_width)` to the wide counter.
/// The wide counter itself wraps at 2^32; callers compare tick values with
/// [`elapsed`](crate::elapsed) so that wrap is harmless.
///
/// When the register is 32 bits wide and the multiplier is 1 the widener is a
/// pass-through: the raw register value is the wide tick count.
///
/// # Liveness
///
/// The widener must be sampled at least once per hardware register period
/// (2^bit_width hardware ticks). A longer gap silently loses whole periods.
/// Nothing detects this, so it is the caller's obligation.
#[derive(Debug)]
pub struct TickWidener<S: TimerSource> {
    source: S,
    mask: u32,
    multiplier: u32,
    pass_through: bool,
    last_raw: u32,
    wide: u32,
}

impl<S: TimerSource> TickWidener<S> {
    /// Create a widener and prime it with one sample.
    ///
    /// The wide counter starts from an assumed previous raw value of 0, so
    /// after priming it holds `raw * multiplier` (or `raw` for pass-through).
    pub fn new(source: S, bit_width: u32, multiplier: u32) -> Result<Self, ConfigError> {
        if bit_width == 0 || bit_width > NATIVE_BITS {
            return Err(ConfigError::InvalidBitWidth { bits: bit_width });
        }
        if multiplier == 0 {
            return Err(ConfigError::ZeroTickMultiplier);
        }

        let pass_through = bit_width == NATIVE_BITS && multiplier == 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(bit_width, multiplier, pass_through, "tick widener configured");

        let mut widener = Self {
            source,
            mask: u32::MAX >> (NATIVE_BITS - bit_width),
            multiplier,
            pass_through,
            last_raw: 0,
            wide: 0,
        };
        widener.sample();
        Ok(widener)
    }

    /// Sample the register and return the updated wide tick count.
    #[inline]
    pub fn sample(&mut self) -> u32 {
        let raw = self.source.read();
        if self.pass_through {
            self.wide = raw;
        } else {
            let diff = raw.wrapping_sub(self.last_raw) & self.mask;
            self.wide = self.wide.wrapping_add(diff.wrapping_mul(self.multiplier));
            self.last_raw = raw;
        }
        self.wide
    }

    /// Wide tick count from the most recent sample (no register read).
    #[inline]
    pub fn last(&self) -> u32 {
        self.wide
    }

    /// Whether the register is used directly as the wide counter.
    pub fn is_pass_through(&self) -> bool {
        self.pass_through
    }

    /// Register mask (`2^bit_width - 1`).
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Internal ticks per hardware tick.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Mutable access to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Give the source back.
    pub fn into_source(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ScriptedSource;

    fn script<const N: usize>(samples: &[u32]) -> ScriptedSource<N> {
        ScriptedSource::from_slice(samples).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert_eq!(
            TickWidener::new(|| 0u32, 0, 1).err(),
            Some(ConfigError::InvalidBitWidth { bits: 0 })
        );
        assert_eq!(
            TickWidener::new(|| 0u32, 40, 1).err(),
            Some(ConfigError::InvalidBitWidth { bits: 40 })
        );
        assert_eq!(
            TickWidener::new(|| 0u32, 16, 0).err(),
            Some(ConfigError::ZeroTickMultiplier)
        );
    }

    #[test]
    fn test_masks() {
        assert_eq!(TickWidener::new(|| 0u32, 1, 1).unwrap().mask(), 0x1);
        assert_eq!(TickWidener::new(|| 0u32, 8, 1).unwrap().mask(), 0xFF);
        assert_eq!(TickWidener::new(|| 0u32, 16, 1).unwrap().mask(), 0xFFFF);
        assert_eq!(TickWidener::new(|| 0u32, 32, 2).unwrap().mask(), u32::MAX);
    }

    #[test]
    fn test_16bit_wrap_scenario() {
        let mut w = TickWidener::new(script::<8>(&[0, 500, 65500, 300]), 16, 1).unwrap();
        assert_eq!(w.last(), 0);
        assert_eq!(w.sample(), 500);
        assert_eq!(w.sample(), 65500);
        // (300 - 65500) mod 2^16 = 336
        assert_eq!(w.sample(), 65836);
    }

    #[test]
    fn test_8bit_wrap() {
        let mut w = TickWidener::new(script::<8>(&[250, 4, 200, 10]), 8, 1).unwrap();
        assert_eq!(w.last(), 250);
        assert_eq!(w.sample(), 260);
        assert_eq!(w.sample(), 456);
        assert_eq!(w.sample(), 522);
    }

    #[test]
    fn test_multiplier_scales_delta() {
        let mut w = TickWidener::new(script::<4>(&[0, 100, 65535, 5]), 16, 10).unwrap();
        assert_eq!(w.last(), 0);
        assert_eq!(w.sample(), 1000);
        assert_eq!(w.sample(), 655_350);
        assert_eq!(w.sample(), 655_410);
    }

    #[test]
    fn test_pass_through_returns_raw() {
        let mut w = TickWidener::new(script::<4>(&[7, u32::MAX, 3]), 32, 1).unwrap();
        assert!(w.is_pass_through());
        assert_eq!(w.last(), 7);
        assert_eq!(w.sample(), u32::MAX);
        assert_eq!(w.sample(), 3);
    }

    #[test]
    fn test_32bit_with_multiplier_wraps_wide_counter() {
        let mut w = TickWidener::new(script::<4>(&[0, u32::MAX - 1, 2]), 32, 2).unwrap();
        assert!(!w.is_pass_through());
        assert_eq!(w.sample(), (u32::MAX - 1).wrapping_mul(2));
        // raw delta 4, scaled 8, wide counter wraps at 2^32
        assert_eq!(w.sample(), (u32::MAX - 1).wrapping_mul(2).wrapping_add(8));
    }

    #[test]
    fn test_bits_above_width_are_ignored() {
        let mut w = TickWidener::new(script::<4>(&[0x1_0000, 0x2_0005]), 16, 1).unwrap();
        assert_eq!(w.last(), 0);
        assert_eq!(w.sample(), 5);
    }

    #[test]
    fn test_repeated_sample_of_same_value_is_stable() {
        let mut w = TickWidener::new(script::<4>(&[9, 9, 9]), 12, 3).unwrap();
        assert_eq!(w.last(), 27);
        assert_eq!(w.sample(), 27);
        assert_eq!(w.sample(), 27);
    }
}
