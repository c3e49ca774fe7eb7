//! Replay timer sources.
//!
//! Sources that do not touch hardware, for host-side simulation and for
//! exercising firmware logic without a real timer:
//! - `ScriptedSource` plays back a fixed list of raw register values.
//! - `SharedRegister` is a register the caller sets by hand between queries.
//!
//! Both are fixed-capacity and allocation-free.

use core::cell::Cell;

use crate::source::TimerSource;

/// Plays back a fixed sequence of raw register samples.
///
/// Each `read()` returns the next sample. Once the script is exhausted the
/// last sample is repeated (a stopped timer).
#[derive(Debug, Clone)]
pub struct ScriptedSource<const N: usize> {
    samples: heapless::Vec<u32, N>,
    position: usize,
}

impl<const N: usize> ScriptedSource<N> {
    /// Create an empty script. Reads return 0 until samples are pushed.
    pub const fn new() -> Self {
        Self {
            samples: heapless::Vec::new(),
            position: 0,
        }
    }

    /// Create a script from a slice. Returns `None` if it exceeds capacity `N`.
    pub fn from_slice(samples: &[u32]) -> Option<Self> {
        let mut script = Self::new();
        for &raw in samples {
            script.push(raw).ok()?;
        }
        Some(script)
    }

    /// Append a sample, handing it back if the script is full.
    pub fn push(&mut self, raw: u32) -> Result<(), u32> {
        self.samples.push(raw)
    }

    /// Number of samples not yet read.
    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.position)
    }

    /// Restart playback from the first sample.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl<const N: usize> Default for ScriptedSource<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TimerSource for ScriptedSource<N> {
    fn read(&mut self) -> u32 {
        match self.samples.get(self.position) {
            Some(&raw) => {
                self.position += 1;
                raw
            }
            None => self.samples.last().copied().unwrap_or(0),
        }
    }
}

/// A register value set by hand.
///
/// The register is shared: hand [`handle()`](Self::handle) to the counters
/// and keep the register itself to move time forward.
#[derive(Debug, Default)]
pub struct SharedRegister {
    value: Cell<u32>,
    bit_width: u32,
}

impl SharedRegister {
    /// Create a `bit_width`-bit register holding `initial` (masked).
    pub const fn new(bit_width: u32, initial: u32) -> Self {
        Self {
            value: Cell::new(initial & width_mask(bit_width)),
            bit_width,
        }
    }

    /// Register mask (`2^bit_width - 1`, all ones for widths of 32 or more).
    pub const fn mask(&self) -> u32 {
        width_mask(self.bit_width)
    }

    /// Current raw value.
    pub fn get(&self) -> u32 {
        self.value.get()
    }

    /// Overwrite the raw value (masked to the register width).
    pub fn set(&self, raw: u32) {
        self.value.set(raw & self.mask());
    }

    /// Advance the register by `ticks`, wrapping at the register width.
    pub fn advance(&self, ticks: u32) {
        self.set(self.value.get().wrapping_add(ticks));
    }

    /// Borrow the register as a timer source.
    pub fn handle(&self) -> RegisterHandle<'_> {
        RegisterHandle(self)
    }
}

const fn width_mask(bit_width: u32) -> u32 {
    if bit_width >= u32::BITS {
        u32::MAX
    } else {
        (1u32 << bit_width) - 1
    }
}

/// Timer source view of a [`SharedRegister`].
#[derive(Debug, Clone, Copy)]
pub struct RegisterHandle<'a>(&'a SharedRegister);

impl TimerSource for RegisterHandle<'_> {
    #[inline]
    fn read(&mut self) -> u32 {
        self.0.get()
    }
}
