//! Agent state enums.

use campus_core::{EdgeId, LocationId, MapPoint};
use campus_graph::CampusGraph;

// ── AgentState ────────────────────────────────────────────────────────────────

/// Finite-state machine states.  `Done` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Before the current activity's start, or retrying an unreachable target.
    #[default]
    Waiting,
    /// Walking the current route.
    Traveling,
    /// At the target, counting down the dwell.
    Dwelling,
    /// Schedule exhausted.
    Done,
}

impl AgentState {
    /// Lowercase label for CSV columns and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Waiting   => "waiting",
            AgentState::Traveling => "traveling",
            AgentState::Dwelling  => "dwelling",
            AgentState::Done      => "done",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Position ──────────────────────────────────────────────────────────────────

/// Where an agent is: at a location, or somewhere along an edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Position {
    At(LocationId),
    OnEdge {
        edge:     EdgeId,
        /// Linear time progress along the edge, in `[0, 1]`.
        progress: f32,
        /// Eased distance fraction, `smoothstep(progress)`.
        fraction: f32,
    },
}

impl Position {
    /// The location, if standing at one.
    pub fn location(self) -> Option<LocationId> {
        match self {
            Position::At(loc) => Some(loc),
            Position::OnEdge { .. } => None,
        }
    }

    /// Map coordinate for rendering.
    pub fn point(self, graph: &CampusGraph) -> MapPoint {
        match self {
            Position::At(loc) => graph.point(loc),
            Position::OnEdge { edge, fraction, .. } => graph.point_on_edge(edge, fraction),
        }
    }
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// The state transition one call to [`Agent::step`][crate::Agent::step]
/// ended on.  Events passed through on the way (a departure that reaches
/// the target in the same second, an arrival whose dwell ends at once) are
/// flagged on [`StepEvents`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum StepOutcome {
    /// Nothing changed: waiting for the start time, or already done.
    #[default]
    Idle,
    /// A route was found and the agent set off.
    Departed,
    /// Still travelling.
    Moved,
    /// Reached the target (or was already there); dwell started.
    Arrived,
    /// One dwell second elapsed.
    Dwelled,
    /// Dwell finished; the next activity is pending.
    ActivityCompleted,
    /// Dwell finished on the last activity; the agent is now done.
    Finished,
    /// No route to `target`; the agent stays waiting and retries.
    /// `first` is set on the first failed attempt for this activity.
    Unreachable { target: LocationId, first: bool },
    /// No route to `target`; the activity was abandoned.
    Skipped { target: LocationId },
}

impl StepOutcome {
    /// `true` for the outcomes that end an activity.
    pub fn completes_activity(self) -> bool {
        matches!(
            self,
            StepOutcome::ActivityCompleted | StepOutcome::Finished | StepOutcome::Skipped { .. }
        )
    }
}

// ── StepEvents ────────────────────────────────────────────────────────────────

/// Everything that happened to one agent during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct StepEvents {
    /// A route was found and the agent left its location.
    pub departed: bool,
    /// The agent reached its target (or found itself already there) and
    /// started dwelling.
    pub arrived:  bool,
    pub outcome:  StepOutcome,
}
