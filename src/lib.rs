//! # systime
//!
//! Drift-free system time for small embedded targets without a 64-bit or
//! high-resolution real-time clock.
//!
//! **Key features:**
//! - **Any timer width** - Widens a 1 to 32-bit wrapping register into a free-running tick counter
//! - **Zero drift** - Milliseconds and seconds carry their remainder (Bresenham-style), so long-run error stays at zero
//! - **No divider required** - Run-time choice between division and repeated subtraction, bit-identical results
//! - **Consistent snapshots** - Ticks, milliseconds and seconds from one sampling instant
//! - **Wall-clock seconds** - Set or adjust reported seconds without touching ticks or milliseconds
//!
//! ## Usage contract
//!
//! The timer must be sampled (any query that reads it) at least once per
//! hardware register period, otherwise elapsed time is silently lost. Nothing
//! is synchronized internally: use each clock from one context or guard it.
//!
//! ## Optional Features
//!
//! - `serde` - Serialize/deserialize configuration types and snapshots
//! - `tracing` - Debug events for configuration and seconds adjustments
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod source;

// Layered counters
pub mod counter;

// Fused clock
pub mod systime;

pub mod elapsed;
pub mod replay;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Timer source
pub use source::TimerSource;

// Configuration
pub use config::{
    DivStrategy, SecondsMode, SysTimeConfig, Timer1MHz16Bit, Timer10MHz32Bit,
    Timer11MHz0592_16Bit, TimerPreset,
};

// Error types
pub use error::ConfigError;

// Counters
pub use counter::{MsCounter, SecCounter, TickWidener};

// Fused clock
pub use systime::{Snapshot, SysTime};

// Elapsed helpers
pub use elapsed::{elapsed, expired};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
