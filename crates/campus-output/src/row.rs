//! Flat row types handed to an [`OutputWriter`][crate::OutputWriter].

/// One agent's position and status at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:        u32,
    /// Clock value, seconds of day.
    pub tick:            u64,
    pub x:               f32,
    pub y:               f32,
    /// `waiting`, `traveling`, `dwelling` or `done`.
    pub state:           &'static str,
    pub schedule_cursor: u32,
}

/// Per-tick counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummaryRow {
    /// Ticks since the clock started.
    pub tick:        u64,
    /// Clock value, seconds of day.
    pub clock:       u64,
    pub departed:    u32,
    pub arrived:     u32,
    pub completed:   u32,
    pub unreachable: u32,
    pub done_agents: u32,
}

/// A failed route lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreachableRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub target:   u32,
}
