//! Seeded random schedule generation.
//!
//! A `ScheduleTemplate` is a fixed daily timetable whose slots each list
//! several candidate destinations ("breakfast at one of three canteens").
//! Each agent draws its own choices from an [`AgentRng`], so the expansion is
//! reproducible for a given seed and independent of the order in which
//! agents are generated.

use campus_core::{AgentRng, LocationId, Tick};

use crate::{Activity, Destination, Schedule, ScheduleError, ScheduleResult};

/// One timetable slot with its candidate destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSlot {
    pub start:      Tick,
    pub dwell_secs: u32,
    pub choices:    Vec<Destination>,
}

/// A daily timetable with per-slot destination choices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleTemplate {
    pub slots: Vec<TemplateSlot>,
}

impl ScheduleTemplate {
    pub fn new(slots: Vec<TemplateSlot>) -> Self {
        Self { slots }
    }

    /// Draw one destination per slot and validate the resulting schedule.
    pub fn generate(&self, home: LocationId, rng: &mut AgentRng) -> ScheduleResult<Schedule> {
        let activities = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let dest = rng.choose(&slot.choices).ok_or(ScheduleError::EmptySlot(i))?;
                Ok(Activity::new(dest.resolve(home), slot.start, slot.dwell_secs))
            })
            .collect::<ScheduleResult<Vec<_>>>()?;
        Schedule::new(activities)
    }
}
