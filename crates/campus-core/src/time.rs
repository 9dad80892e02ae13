//! Virtual day clock.
//!
//! # Design
//!
//! Time is an integer count of seconds since midnight of the single
//! simulated day.  One tick is exactly one second, so a `Tick` doubles as a
//! second-of-day timestamp and all schedule arithmetic is exact.
//!
//! The clock starts at a configured offset (e.g. 07:15:00) and is advanced
//! by one each step.  There is no wraparound: the counter keeps increasing
//! past [`DAY_SECS`] if a run is allowed to go that far, but schedules are
//! bounded to the day at load time.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Seconds in the simulated day.
pub const DAY_SECS: u64 = 86_400;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A second-of-day timestamp.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Build from wall-clock components, e.g. `Tick::from_hms(7, 15, 0)`.
    #[inline]
    pub const fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Tick {
        Tick(hours * 3_600 + minutes * 60 + seconds)
    }

    /// Split into `(hours, minutes, seconds)`.  Hours are not wrapped at 24.
    pub fn hms(self) -> (u64, u64, u64) {
        (self.0 / 3_600, (self.0 % 3_600) / 60, self.0 % 60)
    }

    /// Seconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// The tick one second earlier, saturating at zero.
    #[inline]
    pub fn prev(self) -> Tick {
        Tick(self.0.saturating_sub(1))
    }

    /// `true` while the timestamp lies within the simulated day.
    #[inline]
    pub fn within_day(self) -> bool {
        self.0 <= DAY_SECS
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single integer-second counter shared by all agents.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Second of day at which the run started.
    pub start: Tick,
    /// The current second — advanced by [`SimClock::advance`] each step.
    pub current: Tick,
}

impl SimClock {
    pub fn new(start: Tick) -> Self {
        Self { start, current: start }
    }

    /// Advance by exactly one second and return the new value.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.current = self.current + 1;
        self.current
    }

    /// Steps taken since the run started.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.current.since(self.start)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{}s)", self.current, self.elapsed())
    }
}

// ── UnreachablePolicy ─────────────────────────────────────────────────────────

/// What an agent does when no route leads to its activity's target.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnreachablePolicy {
    /// Stay waiting and retry path-finding every tick.
    #[default]
    Retry,
    /// Abandon the activity and move on to the next one.
    Skip,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run configuration, passed to the simulation at construction time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Second of day the clock starts at.
    pub start_secs: u64,

    /// Second of day after which `Sim::run` stops even if agents are still
    /// active.  Must be greater than `start_secs`.
    pub end_secs: u64,

    /// Master seed for generated schedules.
    pub seed: u64,

    /// Worker threads for the `parallel` feature.  `None` uses Rayon's
    /// global pool.
    pub num_threads: Option<usize>,

    /// Emit an agent snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Behaviour on unreachable activity targets.
    pub unreachable_policy: UnreachablePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_secs:            0,
            end_secs:              DAY_SECS,
            seed:                  0,
            num_threads:           None,
            output_interval_ticks: 60,
            unreachable_policy:    UnreachablePolicy::Retry,
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn start_tick(&self) -> Tick {
        Tick(self.start_secs)
    }

    /// Last tick `Sim::run` will process (inclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.end_secs)
    }

    /// A clock positioned at `start_secs`.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_tick())
    }

    /// Reject start/end values outside the day or in the wrong order.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.start_tick().within_day() {
            return Err(CoreError::OutOfDay(self.start_tick()));
        }
        if !self.end_tick().within_day() {
            return Err(CoreError::OutOfDay(self.end_tick()));
        }
        if self.end_secs <= self.start_secs {
            return Err(CoreError::Config(format!(
                "end_secs {} must be greater than start_secs {}",
                self.end_secs, self.start_secs
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
