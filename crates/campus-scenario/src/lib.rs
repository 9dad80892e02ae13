//! `campus-scenario` — JSON scenario loader for the campus_sim workspace.
//!
//! # Document format
//!
//! ```json
//! {
//!   "config":    { "start_secs": 25200, "end_secs": 86400, "seed": 7 },
//!   "locations": { "Dorm": [0.1, 0.2], "Library": [0.5, 0.5] },
//!   "edges":     [ { "id": 1, "start": "Dorm", "end": "Library",
//!                    "length": 120.0, "time_cost": 90.0 } ],
//!   "agents":    [ { "id": 0, "name": "Ada", "home": "Dorm" } ],
//!   "schedules": { "0": [ { "target": "Library", "start_secs": 28800,
//!                           "dwell_secs": 3000 } ] }
//! }
//! ```
//!
//! Each edge is an undirected segment and yields two directed edges.
//! Location ids follow name order.  Times may be seconds of day or
//! `"HH:MM[:SS]"` strings.
//!
//! An agent's schedule comes from the first source that applies:
//!
//! 1. its entry in `schedules`;
//! 2. its `class_name`, expanded through the optional `timetable`;
//! 3. the optional `generate` template, drawn with the agent's own RNG;
//! 4. otherwise an empty schedule.
//!
//! Every load-time problem (unknown location, bad edge, misordered
//! schedule, out-of-range config) is an error; nothing is silently dropped.

pub mod document;
pub mod error;
pub mod scenario;
pub mod timetable;

#[cfg(test)]
mod tests;

pub use document::ScenarioDoc;
pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{AgentInfo, Scenario, ScheduleSource};
pub use timetable::{Subject, Timetable};
