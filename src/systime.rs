//! Fused tick/millisecond/second clock.
//!
//! `SysTime` owns one [`TickWidener`], one [`MsCounter`] and one
//! [`SecCounter`] and always advances them in dependency order (ticks, then
//! milliseconds, then seconds) so a [`Snapshot`] is internally consistent.

use crate::config::SysTimeConfig;
use crate::counter::{MsCounter, SecCounter, TickWidener};
use crate::elapsed::{elapsed, expired};
use crate::error::ConfigError;
use crate::source::TimerSource;

/// Ticks, milliseconds and seconds taken at one sampling instant.
///
/// `sec` is the reported value (any seconds adjustment already applied).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Wide internal tick count
    pub ticks: u32,
    /// Free-running milliseconds
    pub ms: u32,
    /// Reported seconds
    pub sec: u32,
}

impl Snapshot {
    /// Per-unit difference from an earlier snapshot (wraparound-safe).
    ///
    /// The seconds difference includes any seconds adjustment made in between.
    pub const fn since(&self, earlier: &Snapshot) -> Snapshot {
        Snapshot {
            ticks: elapsed(self.ticks, earlier.ticks),
            ms: elapsed(self.ms, earlier.ms),
            sec: elapsed(self.sec, earlier.sec),
        }
    }
}

/// System time built from one hardware timer.
///
/// Not synchronized. Drive it from a single context (a super-loop or one
/// interrupt priority) or serialize access externally; every method is short,
/// non-blocking and does a bounded amount of work.
///
/// # Liveness
///
/// Some sampling method ([`current`](Self::current), [`ticks`](Self::ticks),
/// [`ms`](Self::ms), [`seconds`](Self::seconds), ...) must run at least once
/// per hardware register period, or whole periods are silently lost.
/// Milliseconds and seconds are only folded by full passes, so a full pass is
/// also needed at least once per 2^32 internal ticks.
///
/// # Example
///
/// ```
/// use systime::{SysTime, SysTimeConfig};
/// use systime::replay::SharedRegister;
///
/// // 1 MHz clock into a 16-bit timer
/// let timer = SharedRegister::new(16, 0);
/// let mut clock = SysTime::new(timer.handle(), SysTimeConfig::new(16, 1, 1000)).unwrap();
///
/// for _ in 0..250 {
///     timer.advance(40_000); // 40 ms between polls
///     clock.current();
/// }
///
/// assert_eq!(clock.last_ms(), 10_000);
/// assert_eq!(clock.last_seconds(), 10);
/// ```
#[derive(Debug)]
pub struct SysTime<S: TimerSource> {
    config: SysTimeConfig,
    widener: TickWidener<S>,
    millis: MsCounter,
    seconds: SecCounter,
    pass_ticks: u32,
}

impl<S: TimerSource> SysTime<S> {
    /// Validate `config`, then build and prime all three layers.
    pub fn new(source: S, config: SysTimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let widener = TickWidener::new(source, config.bit_width, config.tick_multiplier)?;
        let pass_ticks = widener.last();
        let millis = MsCounter::new(config.ticks_per_ms, config.strategy, pass_ticks)?;
        let seconds = SecCounter::new(config.seconds_mode, config.strategy, millis.last());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            bit_width = config.bit_width,
            tick_multiplier = config.tick_multiplier,
            ticks_per_ms = config.ticks_per_ms,
            strategy = ?config.strategy,
            seconds_mode = ?config.seconds_mode,
            "systime initialized"
        );

        Ok(Self {
            config,
            widener,
            millis,
            seconds,
            pass_ticks,
        })
    }

    /// Sample the timer and advance ticks, milliseconds and seconds.
    pub fn current(&mut self) -> Snapshot {
        let ticks = self.widener.sample();
        let ms = self.millis.advance(ticks);
        self.seconds.advance(ms);
        self.pass_ticks = ticks;

        Snapshot {
            ticks,
            ms,
            sec: self.seconds.reported(),
        }
    }

    /// Snapshot from the most recent full pass, without sampling the timer.
    ///
    /// Ticks may be slightly stale. Reported seconds reflect any adjustment
    /// made since that pass. Repeated calls return the same snapshot.
    pub fn last(&self) -> Snapshot {
        Snapshot {
            ticks: self.pass_ticks,
            ms: self.millis.last(),
            sec: self.seconds.reported(),
        }
    }

    /// Sample the timer and advance only the tick layer.
    pub fn ticks(&mut self) -> u32 {
        self.widener.sample()
    }

    /// Current milliseconds (full pass).
    pub fn ms(&mut self) -> u32 {
        self.current().ms
    }

    /// Current reported seconds (full pass).
    pub fn seconds(&mut self) -> u32 {
        self.current().sec
    }

    /// Ticks from the most recent full pass.
    pub fn last_ticks(&self) -> u32 {
        self.pass_ticks
    }

    /// Milliseconds from the most recent full pass.
    pub fn last_ms(&self) -> u32 {
        self.millis.last()
    }

    /// Reported seconds as of the most recent full pass.
    pub fn last_seconds(&self) -> u32 {
        self.seconds.reported()
    }

    /// Move reported seconds by `delta`. Ticks and milliseconds are untouched.
    pub fn adjust(&mut self, delta: i32) {
        self.seconds.adjust(delta);
    }

    /// Set reported seconds to `target` as of now.
    ///
    /// Performs a full pass first so the new value is anchored to the current
    /// second. Ticks and milliseconds are untouched.
    pub fn set(&mut self, target: u32) {
        self.current();
        self.seconds.set(target);
    }

    /// Ticks elapsed since `start` (samples the timer).
    pub fn ticks_elapsed(&mut self, start: u32) -> u32 {
        elapsed(self.ticks(), start)
    }

    /// True once `interval` ticks have elapsed since `start` (samples the timer).
    pub fn ticks_expired(&mut self, start: u32, interval: u32) -> bool {
        expired(self.ticks(), start, interval)
    }

    /// Milliseconds elapsed since `start` (full pass).
    pub fn ms_elapsed(&mut self, start: u32) -> u32 {
        elapsed(self.ms(), start)
    }

    /// True once `interval` ms have elapsed since `start` (full pass).
    pub fn ms_expired(&mut self, start: u32, interval: u32) -> bool {
        expired(self.ms(), start, interval)
    }

    /// Seconds elapsed since `start` (full pass, reported seconds).
    pub fn sec_elapsed(&mut self, start: u32) -> u32 {
        elapsed(self.seconds(), start)
    }

    /// True once `interval` seconds have elapsed since `start` (full pass).
    pub fn sec_expired(&mut self, start: u32, interval: u32) -> bool {
        expired(self.seconds(), start, interval)
    }

    /// Active configuration.
    pub fn config(&self) -> &SysTimeConfig {
        &self.config
    }

    /// Current seconds offset (always 0 in direct mode).
    pub fn sec_offset(&self) -> i32 {
        self.seconds.offset()
    }

    /// Free-running seconds, without any adjustment in offset mode.
    pub fn sec_count(&self) -> u32 {
        self.seconds.count()
    }

    /// Give the timer source back.
    pub fn into_source(self) -> S {
        self.widener.into_source()
    }
}
