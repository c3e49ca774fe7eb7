//! Wraparound-safe elapsed-time checks.
//!
//! Work on any of the three units (ticks, milliseconds, seconds). All counters
//! wrap at 2^32, so differences are taken with unsigned wrapping subtraction:
//! a start value taken just before a wrap and a value taken just after still
//! give the small, correct difference.
//!
//! Results are only meaningful for intervals shorter than one full counter
//! period.

/// Units elapsed from `start` to `now`.
#[inline]
pub const fn elapsed(now: u32, start: u32) -> u32 {
    now.wrapping_sub(start)
}

/// True once at least `interval` units have elapsed from `start` to `now`.
#[inline]
pub const fn expired(now: u32, start: u32, interval: u32) -> bool {
    elapsed(now, start) >= interval
}
