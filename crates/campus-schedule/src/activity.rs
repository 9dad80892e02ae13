//! Core schedule types: `Activity`, `Schedule`, and `Destination`.

use campus_core::{DAY_SECS, LocationId, Tick};

use crate::{ScheduleError, ScheduleResult};

// ── Destination ───────────────────────────────────────────────────────────────

/// An activity target before per-agent resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    /// A specific campus location.
    Location(LocationId),
    /// Sentinel: the agent's registered home location.
    Home,
}

impl Destination {
    /// Resolve against the agent's home.
    #[inline]
    pub fn resolve(self, home: LocationId) -> LocationId {
        match self {
            Destination::Location(loc) => loc,
            Destination::Home => home,
        }
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// One scheduled item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activity {
    /// Where the agent has to be.
    pub target: LocationId,
    /// Absolute second of day at which the agent sets off.
    pub start: Tick,
    /// Seconds spent at `target` once arrived.
    pub dwell_secs: u32,
}

impl Activity {
    pub fn new(target: LocationId, start: Tick, dwell_secs: u32) -> Self {
        Self { target, start, dwell_secs }
    }

    /// Nominal end: `start + dwell_secs`.  Actual departure may be later if
    /// travel overruns, since dwell is counted from arrival.
    #[inline]
    pub fn nominal_end(&self) -> Tick {
        self.start + self.dwell_secs as u64
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An agent's ordered, validated list of activities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    activities: Vec<Activity>,
}

impl Schedule {
    /// Validate and wrap `activities`.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::StartOutOfDay`] if a start lies past the day.
    /// - [`ScheduleError::InvalidOrdering`] if an activity does not start
    ///   strictly after the previous one's nominal end.
    pub fn new(activities: Vec<Activity>) -> ScheduleResult<Self> {
        for (index, act) in activities.iter().enumerate() {
            if act.start.0 > DAY_SECS {
                return Err(ScheduleError::StartOutOfDay { index, start: act.start });
            }
            if index > 0 {
                let previous_end = activities[index - 1].nominal_end();
                if act.start <= previous_end {
                    return Err(ScheduleError::InvalidOrdering {
                        index,
                        start: act.start,
                        previous_end,
                    });
                }
            }
        }
        Ok(Self { activities })
    }

    /// A schedule with no activities; its agent is done from the start.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Fail with [`ScheduleError::UnknownLocation`] if any target is not a
    /// valid index into a graph of `location_count` locations.
    pub fn check_targets(&self, location_count: usize) -> ScheduleResult<()> {
        match self.activities.iter().find(|a| a.target.index() >= location_count) {
            Some(bad) => Err(ScheduleError::UnknownLocation(bad.target)),
            None => Ok(()),
        }
    }
}

// ── Clock parsing ─────────────────────────────────────────────────────────────

/// Parse a second-of-day value: plain seconds (`"27000"`), `"HH:MM"`, or
/// `"HH:MM:SS"`.
pub fn parse_clock(s: &str) -> ScheduleResult<Tick> {
    let s = s.trim();
    let bad = || ScheduleError::Parse(format!("invalid time of day {s:?}"));

    if !s.contains(':') {
        return s.parse::<u64>().map(Tick).map_err(|_| bad());
    }

    let parts: Vec<&str> = s.split(':').collect();
    let nums = parts
        .iter()
        .map(|p| p.parse::<u64>().map_err(|_| bad()))
        .collect::<ScheduleResult<Vec<u64>>>()?;

    let tick = match nums.as_slice() {
        // Bound hours before `from_hms` so it cannot overflow.
        [h, m] if *h <= 24 && *m < 60 => Tick::from_hms(*h, *m, 0),
        [h, m, sec] if *h <= 24 && *m < 60 && *sec < 60 => Tick::from_hms(*h, *m, *sec),
        _ => return Err(bad()),
    };
    if !tick.within_day() {
        return Err(bad());
    }
    Ok(tick)
}
