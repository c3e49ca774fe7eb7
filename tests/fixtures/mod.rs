//! Test fixtures and utilities for systime testing.
//!
//! Provides:
//! - `MockTimer`: hand-stepped timer register that counts hardware reads
//! - `PollPattern`: deterministic irregular poll spacing
//! - Helper functions for common test scenarios

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use systime::{SysTime, SysTimeConfig, TimerSource};

// ============================================================================
// MockTimer - Test Timer Implementation
// ============================================================================

/// Mock hardware timer register.
///
/// Clones share the same register, so a test keeps one clone to step time
/// while the clock owns another. Uses `std` types since tests run with std.
#[derive(Debug, Clone)]
pub struct MockTimer {
    value: Rc<Cell<u32>>,
    reads: Rc<Cell<usize>>,
    mask: u32,
}

impl MockTimer {
    /// Create a `bit_width`-bit register starting at 0.
    pub fn new(bit_width: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(0)),
            reads: Rc::new(Cell::new(0)),
            mask: if bit_width >= 32 {
                u32::MAX
            } else {
                (1 << bit_width) - 1
            },
        }
    }

    /// Advance the register by `ticks` hardware ticks (wraps at its width).
    pub fn step(&self, ticks: u32) {
        self.value
            .set(self.value.get().wrapping_add(ticks) & self.mask);
    }

    /// Jump the register to `raw`.
    pub fn set(&self, raw: u32) {
        self.value.set(raw & self.mask);
    }

    /// Current raw value.
    pub fn raw(&self) -> u32 {
        self.value.get()
    }

    /// Number of hardware reads so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl TimerSource for MockTimer {
    fn read(&mut self) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.value.get()
    }
}

// ============================================================================
// PollPattern - Irregular Poll Spacing
// ============================================================================

/// Deterministic pseudo-random poll spacing in `1..=max_step` ticks.
///
/// Linear congruential generator; same seed, same sequence.
#[derive(Debug, Clone)]
pub struct PollPattern {
    state: u32,
    max_step: u32,
}

impl PollPattern {
    pub fn new(seed: u32, max_step: u32) -> Self {
        Self {
            state: seed,
            max_step,
        }
    }

    pub fn next_step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        (self.state >> 8) % self.max_step + 1
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Build a clock on a fresh mock timer, returning both.
pub fn create_clock(config: SysTimeConfig) -> (MockTimer, SysTime<MockTimer>) {
    let timer = MockTimer::new(config.bit_width);
    let clock = SysTime::new(timer.clone(), config).unwrap();
    (timer, clock)
}
