//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use campus_agent::AgentView;
use campus_core::{AgentId, LocationId, Tick};
use campus_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, TickSummaryRow, UnreachableRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots, tick summaries and unreachable
/// events to any [`OutputWriter`].
///
/// `SimObserver` methods return nothing, so the first write error is kept
/// and the rest are dropped.  Check it with
/// [`take_error`][Self::take_error] once the run returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    /// Write a summary row only every N ticks; 1 writes them all.
    summary_every: u64,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, summary_every: 1, last_error: None }
    }

    /// Thin out `tick_summaries` to one row every `n` ticks.
    pub fn with_summary_every(mut self, n: u64) -> Self {
        self.summary_every = n.max(1);
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        if summary.tick % self.summary_every != 0 {
            return;
        }
        let row = TickSummaryRow {
            tick:        summary.tick,
            clock:       summary.clock.0,
            departed:    summary.departed,
            arrived:     summary.arrived,
            completed:   summary.completed,
            unreachable: summary.unreachable,
            done_agents: summary.done_agents,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentView]) {
        if agents.is_empty() {
            return;
        }
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|v| AgentSnapshotRow {
                agent_id:        v.id.0,
                tick:            tick.0,
                x:               v.point.x,
                y:               v.point.y,
                state:           v.state.as_str(),
                schedule_cursor: v.schedule_cursor as u32,
            })
            .collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_unreachable(&mut self, agent: AgentId, target: LocationId, tick: Tick) {
        let row = UnreachableRow { agent_id: agent.0, tick: tick.0, target: target.0 };
        let result = self.writer.write_unreachable(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
