//! Per-tick summaries and whole-run totals.

use campus_agent::{StepEvents, StepOutcome};
use campus_core::Tick;

/// Counts of what happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Ticks elapsed since the clock started, this one included.
    pub tick:        u64,
    /// Clock value the tick ended at.
    pub clock:       Tick,
    pub departed:    u32,
    pub arrived:     u32,
    /// Activities finished or skipped.
    pub completed:   u32,
    pub unreachable: u32,
    /// Activities abandoned under the skip policy; also in `completed`.
    pub skipped:     u32,
    /// Agents in `Done` after the tick.
    pub done_agents: u32,
}

impl TickSummary {
    pub(crate) fn new(tick: u64, clock: Tick) -> Self {
        Self { tick, clock, ..Self::default() }
    }

    /// Fold one agent's events into the counts.  A single tick can both
    /// depart and arrive.
    pub(crate) fn record(&mut self, events: StepEvents) {
        self.departed += events.departed as u32;
        self.arrived  += events.arrived as u32;
        if events.outcome.completes_activity() {
            self.completed += 1;
        }
        match events.outcome {
            StepOutcome::Unreachable { .. } => self.unreachable += 1,
            StepOutcome::Skipped { .. } => {
                self.unreachable += 1;
                self.skipped += 1;
            }
            _ => {}
        }
    }
}

/// Totals accumulated over a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks:                u64,
    pub departures:           u64,
    pub arrivals:             u64,
    pub completed_activities: u64,
    pub unreachable:          u64,
    pub skipped:              u64,
}

impl SimStats {
    pub(crate) fn absorb(&mut self, summary: &TickSummary) {
        self.ticks                += 1;
        self.departures           += summary.departed as u64;
        self.arrivals             += summary.arrived as u64;
        self.completed_activities += summary.completed as u64;
        self.unreachable          += summary.unreachable as u64;
        self.skipped              += summary.skipped as u64;
    }
}
