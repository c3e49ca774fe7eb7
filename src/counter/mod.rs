//! Layered counters: ticks, then milliseconds, then seconds.
//!
//! Each layer only consumes the output of the layer below it. They can be used
//! on their own, or through [`SysTime`](crate::SysTime) which drives all three
//! in dependency order.

pub mod millis;
pub mod seconds;
pub mod tick;

pub use millis::{MsCounter, fold_units};
pub use seconds::SecCounter;
pub use tick::TickWidener;
