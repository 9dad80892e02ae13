//! Raw JSON shapes, deserialized as-is and resolved by [`crate::Scenario`].

use std::collections::BTreeMap;

use serde::Deserialize;

use campus_core::{SimConfig, Tick};
use campus_schedule::parse_clock;

use crate::ScenarioResult;

/// Top-level scenario document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDoc {
    #[serde(default)]
    pub config: SimConfig,
    /// Location name → `[x, y]` in normalized map space.  Ids are assigned
    /// in name order.
    pub locations: BTreeMap<String, [f32; 2]>,
    #[serde(default)]
    pub edges: Vec<EdgeDoc>,
    #[serde(default)]
    pub agents: Vec<AgentDoc>,
    /// Agent id → activities in schedule order.
    #[serde(default)]
    pub schedules: BTreeMap<u32, Vec<ActivityDoc>>,
    #[serde(default)]
    pub timetable: Option<TimetableDoc>,
    /// Random schedule template for agents with no other source.
    #[serde(default)]
    pub generate: Option<Vec<SlotDoc>>,
}

/// An undirected segment between two named locations.
#[derive(Debug, Deserialize)]
pub struct EdgeDoc {
    pub id:        u32,
    pub start:     String,
    pub end:       String,
    pub length:    f64,
    pub time_cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct AgentDoc {
    pub id:   u32,
    #[serde(default)]
    pub name: String,
    pub home: String,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityDoc {
    /// Location name, or `home`.
    pub target: String,
    #[serde(alias = "start")]
    pub start_secs: ClockDoc,
    pub dwell_secs: u32,
}

/// A time of day, either seconds or `"HH:MM[:SS]"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClockDoc {
    Secs(u64),
    Text(String),
}

impl ClockDoc {
    pub fn to_tick(&self) -> ScenarioResult<Tick> {
        match self {
            ClockDoc::Secs(s) => Ok(Tick(*s)),
            ClockDoc::Text(t) => Ok(parse_clock(t)?),
        }
    }
}

// ── Timetable ─────────────────────────────────────────────────────────────────

/// Class timetable: subjects held in buildings, and classes attending a
/// dash-separated list of buildings.
#[derive(Debug, Deserialize)]
pub struct TimetableDoc {
    pub subjects: Vec<SubjectDoc>,
    pub classes:  Vec<ClassDoc>,
    #[serde(default)]
    pub return_home: ReturnHomeDoc,
}

#[derive(Debug, Deserialize)]
pub struct SubjectDoc {
    pub building:   String,
    pub start_time: String,
    pub end_time:   String,
}

#[derive(Debug, Deserialize)]
pub struct ClassDoc {
    pub class_name: String,
    /// e.g. `"F3a-Library-CanteenD5"`.
    pub content: String,
}

/// The closing activity appended to every timetable schedule.
#[derive(Debug, Deserialize)]
pub struct ReturnHomeDoc {
    pub start:      ClockDoc,
    pub dwell_secs: u32,
}

impl Default for ReturnHomeDoc {
    fn default() -> Self {
        Self { start: ClockDoc::Text("20:30".into()), dwell_secs: 1_800 }
    }
}

// ── Generation template ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SlotDoc {
    pub start:      ClockDoc,
    pub dwell_secs: u32,
    /// Candidate location names; `home` is the agent's own home.
    pub choices:    Vec<String>,
}
