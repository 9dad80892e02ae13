//! Class timetable expansion.
//!
//! A class attends the buildings listed in its `content` string.  Every
//! subject held in one of those buildings becomes an activity lasting from
//! the subject's start to its end, and the day closes with a return home.

use rustc_hash::FxHashMap;

use campus_core::{LocationId, Tick};
use campus_schedule::{Activity, ScheduleError};

use crate::document::TimetableDoc;
use crate::{ScenarioError, ScenarioResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub building: LocationId,
    pub start:    Tick,
    pub end:      Tick,
}

/// A resolved timetable, ready to expand per agent.
#[derive(Debug, Clone)]
pub struct Timetable {
    subjects:          Vec<Subject>,
    classes:           FxHashMap<String, Vec<LocationId>>,
    return_home_start: Tick,
    return_home_dwell: u32,
}

impl Timetable {
    /// Resolve building names with `lookup` and parse every time string.
    pub fn resolve<F>(doc: &TimetableDoc, lookup: F) -> ScenarioResult<Self>
    where
        F: Fn(&str) -> Option<LocationId>,
    {
        let find = |name: &str, context: &str| {
            lookup(name).ok_or_else(|| ScenarioError::UnknownLocation {
                name:    name.to_owned(),
                context: context.to_owned(),
            })
        };

        let mut subjects = Vec::with_capacity(doc.subjects.len());
        for s in &doc.subjects {
            let building = find(s.building.trim(), "timetable subject")?;
            let start = campus_schedule::parse_clock(&s.start_time)?;
            let end = campus_schedule::parse_clock(&s.end_time)?;
            if end <= start {
                return Err(ScheduleError::Parse(format!(
                    "subject in {} ends at {} before it starts at {}",
                    s.building, end, start
                ))
                .into());
            }
            subjects.push(Subject { building, start, end });
        }

        let mut classes = FxHashMap::default();
        for c in &doc.classes {
            let context = format!("class {:?}", c.class_name);
            let buildings = c
                .content
                .split('-')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| find(name, &context))
                .collect::<ScenarioResult<Vec<_>>>()?;
            classes.insert(c.class_name.clone(), buildings);
        }

        Ok(Self {
            subjects,
            classes,
            return_home_start: doc.return_home.start.to_tick()?,
            return_home_dwell: doc.return_home.dwell_secs,
        })
    }

    /// Activities for a member of `class` living at `home`, ordered by start
    /// time.  `None` if the class is unknown.
    pub fn activities(&self, class: &str, home: LocationId) -> Option<Vec<Activity>> {
        let buildings = self.classes.get(class)?;

        let mut used = vec![false; self.subjects.len()];
        let mut acts = Vec::new();
        for &building in buildings {
            for (i, subject) in self.subjects.iter().enumerate() {
                if subject.building == building && !used[i] {
                    used[i] = true;
                    acts.push(Activity::new(
                        building,
                        subject.start,
                        subject.end.since(subject.start) as u32,
                    ));
                }
            }
        }
        acts.sort_by_key(|a| a.start);
        acts.push(Activity::new(home, self.return_home_start, self.return_home_dwell));
        Some(acts)
    }
}
