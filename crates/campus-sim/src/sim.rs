//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use campus_agent::{Agent, AgentView, StepEvents, StepOutcome};
use campus_core::{AgentId, SimClock, SimConfig, Tick};
use campus_graph::{CampusGraph, PathFinder};
use campus_schedule::Schedule;

use crate::{NoopObserver, SimObserver, SimStats, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick:
///
/// 1. **Clock**: advance by one second.
/// 2. **Update** (optionally parallel with the `parallel` feature): call
///    [`Agent::step`] once per agent against the shared graph and that
///    agent's schedule.
/// 3. **Report** (sequential, ascending `AgentId`): fold outcomes into a
///    [`TickSummary`], log departures, arrivals and unreachable targets, and
///    notify the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathFinder> {
    pub config: SimConfig,

    /// Second-of-day clock.  Advanced before agents are updated.
    pub clock: SimClock,

    /// Location graph, read-only for the whole run.
    pub graph: CampusGraph,

    /// Per-agent schedules, indexed by `AgentId`.
    pub schedules: Vec<Schedule>,

    /// Per-agent state, indexed by `AgentId`.
    pub agents: Vec<Agent>,

    pub path_finder: P,

    /// Totals since construction.
    pub stats: SimStats,

    pub(crate) done_agents: usize,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<P: PathFinder> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until every agent is done or the clock reaches
    /// `config.end_tick()`, whichever comes first.
    ///
    /// Returns the accumulated statistics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimStats {
        info!(
            agents = self.agents.len(),
            start  = %self.clock.current,
            end    = %self.config.end_tick(),
            "simulation starting"
        );

        while !self.all_done() && self.clock.current < self.config.end_tick() {
            self.process_tick(observer);
        }
        observer.on_sim_end(self.clock.current);

        info!(
            ticks       = self.stats.ticks,
            done        = self.done_agents,
            agents      = self.agents.len(),
            arrivals    = self.stats.arrivals,
            unreachable = self.stats.unreachable,
            "simulation finished at {}",
            self.clock.current
        );
        self.stats
    }

    /// Step exactly `n` ticks, ignoring `end_tick` and completion.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimStats {
        for _ in 0..n {
            self.process_tick(observer);
        }
        self.stats
    }

    /// Advance a single tick without an observer.
    pub fn step(&mut self) -> TickSummary {
        self.process_tick(&mut NoopObserver)
    }

    /// Current clock value.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current
    }

    /// `true` once every agent has exhausted its schedule.
    #[inline]
    pub fn all_done(&self) -> bool {
        self.done_agents == self.agents.len()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// Position and status of every agent, in `AgentId` order.
    pub fn views(&self) -> Vec<AgentView> {
        self.agents.iter().map(|a| a.view(&self.graph)).collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.advance();
        observer.on_tick_start(now);

        let events = self.update_agents(now);

        let mut summary = TickSummary::new(self.clock.elapsed(), now);
        for (agent, ev) in self.agents.iter().zip(events) {
            summary.record(ev);
            report(agent, ev, now, &self.graph, observer);
        }
        self.done_agents = self.agents.iter().filter(|a| a.is_done()).count();
        summary.done_agents = self.done_agents as u32;
        self.stats.absorb(&summary);

        observer.on_tick_end(now, &summary);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && summary.tick % interval == 0 {
            observer.on_snapshot(now, &self.views());
        }
        summary
    }

    /// Step every agent once.  Events come back in `AgentId` order with or
    /// without the `parallel` feature.
    fn update_agents(&mut self, now: Tick) -> Vec<StepEvents> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let graph     = &self.graph;
        let schedules = self.schedules.as_slice();
        let finder    = &self.path_finder;
        let policy    = self.config.unreachable_policy;
        let agents    = &mut self.agents;

        #[cfg(not(feature = "parallel"))]
        {
            agents
                .iter_mut()
                .zip(schedules)
                .map(|(agent, schedule)| agent.step(now, schedule, graph, finder, policy))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut step_all = || -> Vec<StepEvents> {
                agents
                    .par_iter_mut()
                    .zip(schedules.par_iter())
                    .map(|(agent, schedule)| agent.step(now, schedule, graph, finder, policy))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(step_all),
                None => step_all(),
            }
        }
    }
}

/// Log one agent's events and forward unreachable targets to the observer.
fn report<O: SimObserver>(
    agent:    &Agent,
    events:   StepEvents,
    now:      Tick,
    graph:    &CampusGraph,
    observer: &mut O,
) {
    if events.departed {
        debug!(agent = %agent.id, at = %now, "departed");
    }
    if events.arrived {
        debug!(agent = %agent.id, at = %now, to = graph.name(agent.location), "arrived");
    }
    match events.outcome {
        StepOutcome::Finished => {
            debug!(agent = %agent.id, at = %now, "schedule finished");
        }
        StepOutcome::Unreachable { target, first } => {
            if first {
                warn!(
                    agent  = %agent.id,
                    at     = %now,
                    from   = graph.name(agent.location),
                    target = graph.name(target),
                    "no route to activity target; retrying every tick"
                );
            } else {
                debug!(agent = %agent.id, at = %now, target = graph.name(target), "still unreachable");
            }
            observer.on_unreachable(agent.id, target, now);
        }
        StepOutcome::Skipped { target } => {
            warn!(
                agent  = %agent.id,
                at     = %now,
                from   = graph.name(agent.location),
                target = graph.name(target),
                "no route to activity target; skipping activity"
            );
            observer.on_unreachable(agent.id, target, now);
        }
        StepOutcome::Idle
        | StepOutcome::Departed
        | StepOutcome::Moved
        | StepOutcome::Arrived
        | StepOutcome::Dwelled
        | StepOutcome::ActivityCompleted => {}
    }
}
