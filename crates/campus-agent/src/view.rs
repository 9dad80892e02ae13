use campus_core::{AgentId, MapPoint};

use crate::AgentState;

/// Read-only per-tick snapshot of one agent, for renderers and writers.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:              AgentId,
    pub point:           MapPoint,
    pub state:           AgentState,
    pub schedule_cursor: usize,
}
