//! Millisecond accumulator and the shared unit-folding step.
//!
//! Milliseconds are counted Bresenham-style: whole milliseconds are folded out
//! of the window between the last aligned tick and now, and the remainder
//! stays in the window. Nothing is ever truncated away, so a ticks-per-ms
//! ratio that does not divide the poll interval still has zero long-run error.

use crate::config::DivStrategy;
use crate::error::ConfigError;

/// Chunk sizes (in units) peeled off by the subtract strategy, largest first.
const SUBTRACT_CHUNKS: [u32; 3] = [100, 10, 1];

/// Fold every whole `unit` out of the window `now - *aligned`.
///
/// Advances `*aligned` by the folded amount and returns the number of units
/// folded. Afterwards `now - *aligned < unit` (modulo 2^32). Both strategies
/// return identical results for identical inputs.
///
/// `unit` must be non-zero; the counters check that at construction.
#[inline]
pub fn fold_units(now: u32, aligned: &mut u32, unit: u32, strategy: DivStrategy) -> u32 {
    let window = now.wrapping_sub(*aligned);

    let folded = match strategy {
        DivStrategy::Divide => window / unit,
        DivStrategy::Subtract => {
            let mut rest = window;
            let mut folded = 0u32;
            for chunk in SUBTRACT_CHUNKS {
                // A chunk whose tick span overflows u32 can never fit in the window.
                let Some(step) = unit.checked_mul(chunk) else {
                    continue;
                };
                while rest >= step {
                    rest -= step;
                    folded += chunk;
                }
            }
            folded
        }
    };

    *aligned = aligned.wrapping_add(folded.wrapping_mul(unit));

    #[cfg(feature = "tracing")]
    {
        if folded != 0 {
            tracing::trace!(folded, unit, ?strategy, "folded units");
        }
    }

    folded
}

/// Free-running millisecond counter driven by wide tick values.
///
/// Invariant after every [`advance`](Self::advance): the ticks not yet folded
/// into milliseconds (`now - aligned_tick`) are fewer than `ticks_per_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsCounter {
    ticks_per_ms: u32,
    strategy: DivStrategy,
    aligned_tick: u32,
    ms: u32,
}

impl MsCounter {
    /// Create a counter at 0 ms and prime it with the current tick value.
    ///
    /// Ticks elapsed since tick 0 are folded in by the priming pass.
    pub fn new(ticks_per_ms: u32, strategy: DivStrategy, now: u32) -> Result<Self, ConfigError> {
        if ticks_per_ms == 0 {
            return Err(ConfigError::ZeroTicksPerMs);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(ticks_per_ms, ?strategy, "millisecond counter configured");

        let mut counter = Self {
            ticks_per_ms,
            strategy,
            aligned_tick: 0,
            ms: 0,
        };
        counter.advance(now);
        Ok(counter)
    }

    /// Fold every complete millisecond up to tick `now` and return the count.
    #[inline]
    pub fn advance(&mut self, now: u32) -> u32 {
        let folded = fold_units(now, &mut self.aligned_tick, self.ticks_per_ms, self.strategy);
        self.ms = self.ms.wrapping_add(folded);
        self.ms
    }

    /// Millisecond count from the most recent advance.
    #[inline]
    pub fn last(&self) -> u32 {
        self.ms
    }

    /// Tick up to which milliseconds have been accounted for.
    pub fn aligned_tick(&self) -> u32 {
        self.aligned_tick
    }

    /// Ticks carried towards the next millisecond as of tick `now`.
    pub fn remainder(&self, now: u32) -> u32 {
        now.wrapping_sub(self.aligned_tick)
    }

    /// Configured ticks per millisecond.
    pub fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }

    /// Configured folding strategy.
    pub fn strategy(&self) -> DivStrategy {
        self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_ticks_per_ms() {
        assert_eq!(
            MsCounter::new(0, DivStrategy::Divide, 0),
            Err(ConfigError::ZeroTicksPerMs)
        );
    }

    #[test]
    fn test_fold_divide() {
        let mut aligned = 0;
        assert_eq!(fold_units(2500, &mut aligned, 1000, DivStrategy::Divide), 2);
        assert_eq!(aligned, 2000);
        assert_eq!(fold_units(2999, &mut aligned, 1000, DivStrategy::Divide), 0);
        assert_eq!(fold_units(3000, &mut aligned, 1000, DivStrategy::Divide), 1);
        assert_eq!(aligned, 3000);
    }

    #[test]
    fn test_fold_subtract_exact_boundary() {
        // Exactly one unit must fold (boundary is inclusive)
        let mut aligned = 0;
        assert_eq!(fold_units(1000, &mut aligned, 1000, DivStrategy::Subtract), 1);
        assert_eq!(aligned, 1000);

        let mut aligned = 0;
        assert_eq!(fold_units(111_000, &mut aligned, 1000, DivStrategy::Subtract), 111);
        assert_eq!(aligned, 111_000);
    }

    #[test]
    fn test_fold_across_tick_wrap() {
        for strategy in [DivStrategy::Divide, DivStrategy::Subtract] {
            let mut aligned = u32::MAX - 499;
            assert_eq!(fold_units(1500, &mut aligned, 1000, strategy), 2);
            assert_eq!(aligned, 1500);
        }
    }

    #[test]
    fn test_fold_huge_unit_skips_overflowing_chunks() {
        let unit = 500_000_000;
        let mut a = 0;
        let mut b = 0;
        assert_eq!(fold_units(u32::MAX, &mut a, unit, DivStrategy::Divide), 8);
        assert_eq!(fold_units(u32::MAX, &mut b, unit, DivStrategy::Subtract), 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_strategies_identical_over_irregular_stream() {
        let mut div = MsCounter::new(110, DivStrategy::Divide, 0).unwrap();
        let mut sub = MsCounter::new(110, DivStrategy::Subtract, 0).unwrap();

        let mut now = 0u32;
        let mut step = 1u32;
        for _ in 0..20_000 {
            // irregular poll spacing, occasionally long gaps
            step = step.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            now = now.wrapping_add(step % 50_000);
            assert_eq!(div.advance(now), sub.advance(now));
            assert_eq!(div.aligned_tick(), sub.aligned_tick());
        }
    }

    #[test]
    fn test_remainder_is_carried() {
        let mut ms = MsCounter::new(3, DivStrategy::Divide, 0).unwrap();
        // 10 polls of 1 tick, 3 ticks/ms
        for t in 1..=10 {
            ms.advance(t);
            assert!(ms.remainder(t) < 3);
        }
        assert_eq!(ms.last(), 3);
        assert_eq!(ms.remainder(10), 1);
    }

    #[test]
    fn test_priming_folds_ticks_since_zero() {
        let ms = MsCounter::new(1000, DivStrategy::Divide, 65_836).unwrap();
        assert_eq!(ms.last(), 65);
        assert_eq!(ms.aligned_tick(), 65_000);
    }
}
