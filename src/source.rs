//! Hardware timer abstraction.
//!
//! The `TimerSource` trait is the only thing this crate needs from the platform:
//! a way to sample the current value of a free-running counter register. The
//! crate never owns or drives the timer, it only reads it on demand.

/// Platform-agnostic timer register trait.
///
/// Implementations return the raw register value right-aligned in a `u32`.
/// Only the low `bit_width` bits (as configured) are significant; anything
/// above is masked off by the tick widener.
///
/// `read()` is called once per query and MUST NOT block. It may be backed by a
/// free-running hardware timer or by a variable incremented from a periodic
/// interrupt.
///
/// Any `FnMut() -> u32` is a `TimerSource`, so a register-read closure or a
/// plain function can be passed directly.
pub trait TimerSource {
    /// Sample the current raw counter value.
    fn read(&mut self) -> u32;
}

impl<F> TimerSource for F
where
    F: FnMut() -> u32,
{
    #[inline]
    fn read(&mut self) -> u32 {
        self()
    }
}

/// Wrapper that lends a source by mutable reference.
///
/// Lets a caller keep ownership of a source (e.g. a replay script) while a
/// widener samples it.
#[derive(Debug)]
pub struct Borrowed<'a, S: TimerSource>(pub &'a mut S);

impl<S: TimerSource> TimerSource for Borrowed<'_, S> {
    #[inline]
    fn read(&mut self) -> u32 {
        self.0.read()
    }
}
