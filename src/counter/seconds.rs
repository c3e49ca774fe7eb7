//! Second accumulator with wall-clock adjustment.

use crate::config::{DivStrategy, MS_PER_SECOND, SecondsMode};

use super::millis::fold_units;

/// Free-running seconds counter driven by millisecond values.
///
/// Same folding scheme as [`MsCounter`](super::MsCounter) with a fixed
/// 1000 ms boundary. On top of that, reported seconds can be moved with
/// [`adjust`](Self::adjust) and [`set`](Self::set), according to the
/// configured [`SecondsMode`]:
///
/// - `Offset`: a separate offset is added to the free-running count when
///   seconds are reported. Reported = `sec_count + offset`.
/// - `Direct`: the free-running count itself is rewritten and the offset
///   stays 0.
///
/// Neither mode touches tick or millisecond accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecCounter {
    mode: SecondsMode,
    strategy: DivStrategy,
    aligned_ms: u32,
    sec: u32,
    offset: u32,
}

impl SecCounter {
    /// Create a counter at 0 s and prime it with the current millisecond value.
    pub fn new(mode: SecondsMode, strategy: DivStrategy, now_ms: u32) -> Self {
        let mut counter = Self {
            mode,
            strategy,
            aligned_ms: 0,
            sec: 0,
            offset: 0,
        };
        counter.advance(now_ms);
        counter
    }

    /// Fold every complete second up to `now_ms`; returns the free-running count.
    #[inline]
    pub fn advance(&mut self, now_ms: u32) -> u32 {
        let folded = fold_units(now_ms, &mut self.aligned_ms, MS_PER_SECOND, self.strategy);
        self.sec = self.sec.wrapping_add(folded);
        self.sec
    }

    /// Free-running seconds from the most recent advance (no offset).
    #[inline]
    pub fn count(&self) -> u32 {
        self.sec
    }

    /// Reported seconds as of the most recent advance (offset applied).
    #[inline]
    pub fn reported(&self) -> u32 {
        self.sec.wrapping_add(self.offset)
    }

    /// Current offset, as a signed number of seconds.
    pub fn offset(&self) -> i32 {
        self.offset as i32
    }

    /// Millisecond value up to which seconds have been accounted for.
    pub fn aligned_ms(&self) -> u32 {
        self.aligned_ms
    }

    /// Configured seconds mode.
    pub fn mode(&self) -> SecondsMode {
        self.mode
    }

    /// Move reported seconds by `delta` (negative moves back).
    pub fn adjust(&mut self, delta: i32) {
        self.shift(delta as u32);
    }

    /// Make the reported seconds equal `target` as of the most recent advance.
    ///
    /// Advance first to get "now" semantics.
    pub fn set(&mut self, target: u32) {
        self.shift(target.wrapping_sub(self.reported()));
    }

    fn shift(&mut self, delta: u32) {
        match self.mode {
            SecondsMode::Offset => self.offset = self.offset.wrapping_add(delta),
            SecondsMode::Direct => self.sec = self.sec.wrapping_add(delta),
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            delta = delta as i32,
            mode = ?self.mode,
            reported = self.reported(),
            "seconds adjusted"
        );
    }
}
