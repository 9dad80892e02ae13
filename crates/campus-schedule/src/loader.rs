//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per activity, rows for one agent in schedule order:
//!
//! ```csv
//! agent_id,target,start,dwell_secs
//! 0,CanteenD5,07:00,1200
//! 0,F3a,08:00,6000
//! 0,home,20:30,1800
//! 1,Library,28800,3600
//! ```
//!
//! | Column       | Meaning                                                  |
//! |--------------|----------------------------------------------------------|
//! | `agent_id`   | Index into the agent list                                |
//! | `target`     | Location name, or `home` for the agent's home location   |
//! | `start`      | Seconds of day, `HH:MM`, or `HH:MM:SS`                   |
//! | `dwell_secs` | Seconds to stay once arrived                             |
//!
//! Agents absent from the file receive an empty schedule.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use campus_core::LocationId;

use crate::activity::{Activity, Schedule, parse_clock};
use crate::ScheduleError;

#[derive(Deserialize)]
struct ScheduleRecord {
    agent_id:   u32,
    target:     String,
    start:      String,
    dwell_secs: u32,
}

/// Load per-agent schedules from a CSV file.
///
/// `homes[i]` is agent `i`'s home location; its length fixes the agent
/// count.  `resolve` maps a location name to its id.
pub fn load_schedules_csv<F>(
    path: &Path,
    homes: &[LocationId],
    resolve: F,
) -> Result<Vec<Schedule>, ScheduleError>
where
    F: Fn(&str) -> Option<LocationId>,
{
    let file = std::fs::File::open(path)?;
    load_schedules_reader(file, homes, resolve)
}

/// Like [`load_schedules_csv`] but reads from any `Read` source.
pub fn load_schedules_reader<R, F>(
    reader: R,
    homes: &[LocationId],
    resolve: F,
) -> Result<Vec<Schedule>, ScheduleError>
where
    R: Read,
    F: Fn(&str) -> Option<LocationId>,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_agent: Vec<Vec<Activity>> = vec![Vec::new(); homes.len()];

    for result in csv_reader.deserialize::<ScheduleRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let home = *homes
            .get(row.agent_id as usize)
            .ok_or(ScheduleError::UnknownAgent(row.agent_id))?;

        let name = row.target.trim();
        let target = if name == "home" {
            home
        } else {
            resolve(name).ok_or_else(|| ScheduleError::UnknownLocationName(name.to_owned()))?
        };

        by_agent[row.agent_id as usize].push(Activity::new(
            target,
            parse_clock(&row.start)?,
            row.dwell_secs,
        ));
    }

    by_agent.into_iter().map(Schedule::new).collect()
}
