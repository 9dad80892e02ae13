//! `campus-agent` — the per-agent wait → travel → dwell state machine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`state`]  | `AgentState`, `Position`, `StepOutcome`, `StepEvents`        |
//! | [`agent`]  | `Agent` — mutable per-agent state and its transition function |
//! | [`view`]   | `AgentView` — read-only per-tick snapshot for presentation   |
//! | [`error`]  | `AgentError`, `AgentResult<T>`                               |
//!
//! # Movement model
//!
//! Each tick covers the one-second interval ending at the clock value
//! passed to [`Agent::step`].  An agent whose activity has started looks
//! up a route once, then walks it edge by edge:
//!
//! 1. Progress on the current edge is `(now − segment_start) / time_cost`,
//!    capped at 1.  The visual position eases along the edge with
//!    `smoothstep(progress)`.
//! 2. When progress reaches 1 the agent moves on to the next edge, taking
//!    the current tick as the new segment start.
//! 3. After the last edge the agent snaps exactly to the target and begins
//!    its dwell countdown, one second per tick.
//!
//! Agents share nothing mutable.  The graph and schedules are borrowed
//! read-only, so a driver may step many agents in parallel.

pub mod agent;
pub mod error;
pub mod state;
pub mod view;


pub use agent::Agent;
pub use error::{AgentError, AgentResult};
pub use state::{AgentState, Position, StepEvents, StepOutcome};
pub use view::AgentView;
