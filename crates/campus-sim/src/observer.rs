//! Simulation observer trait for progress reporting and data collection.

use campus_agent::AgentView;
use campus_core::{AgentId, LocationId, Tick};

use crate::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — arrival counter
///
/// ```rust,ignore
/// struct Arrivals(u64);
///
/// impl SimObserver for Arrivals {
///     fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
///         self.0 += summary.arrived as u64;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the clock has advanced, before any agent is updated.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every agent has been updated for `tick`.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with the position
    /// and status of every agent, in `AgentId` order.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentView]) {}

    /// Called for each failed route lookup, after `on_tick_start` and before
    /// `on_tick_end` of the same tick.
    fn on_unreachable(&mut self, _agent: AgentId, _target: LocationId, _tick: Tick) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
