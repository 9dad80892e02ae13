//! Fluent builder for constructing a [`Sim`].

use campus_agent::Agent;
use campus_core::{AgentId, LocationId, SimConfig};
use campus_graph::{CampusGraph, PathFinder};
use campus_schedule::{Schedule, ScheduleError};

use crate::{Sim, SimError, SimResult, SimStats};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — start/end seconds, snapshot interval, unreachable policy
/// - [`CampusGraph`] — the location graph
/// - `P: PathFinder` — the routing algorithm (e.g.
///   [`campus_graph::DijkstraPathFinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                      |
/// |-------------------|------------------------------|
/// | `.agents(homes)`  | No agents                    |
/// | `.schedules(v)`   | An empty schedule per agent  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, graph, DijkstraPathFinder)
///     .agents(homes)
///     .schedules(schedules)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: PathFinder> {
    config:      SimConfig,
    graph:       CampusGraph,
    path_finder: P,
    homes:       Vec<LocationId>,
    schedules:   Option<Vec<Schedule>>,
}

impl<P: PathFinder> SimBuilder<P> {
    pub fn new(config: SimConfig, graph: CampusGraph, path_finder: P) -> Self {
        Self {
            config,
            graph,
            path_finder,
            homes:     Vec::new(),
            schedules: None,
        }
    }

    /// One home location per agent.  Agent `i` gets `AgentId(i)` and starts
    /// at `homes[i]`.
    pub fn agents(mut self, homes: Vec<LocationId>) -> Self {
        self.homes = homes;
        self
    }

    /// Per-agent schedules (must be length `agent_count`).
    pub fn schedules(mut self, schedules: Vec<Schedule>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    /// Validate inputs, place agents at home, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        let agent_count = self.homes.len();

        let schedules = match self.schedules {
            Some(s) => {
                if s.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      s.len(),
                        what:     "schedules",
                    });
                }
                s
            }
            None => vec![Schedule::empty(); agent_count],
        };

        // ── Validate location references and place agents ────────────────
        let location_count = self.graph.location_count();
        let mut agents = Vec::with_capacity(agent_count);
        for (i, (&home, schedule)) in self.homes.iter().zip(&schedules).enumerate() {
            let id = AgentId(i as u32);
            if let Err(ScheduleError::UnknownLocation(location)) =
                schedule.check_targets(location_count)
            {
                return Err(SimError::UnknownLocation { agent: id, location });
            }
            agents.push(Agent::new(id, home, schedule, &self.graph)?);
        }
        let done_agents = agents.iter().filter(|a| a.is_done()).count();

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            graph: self.graph,
            schedules,
            agents,
            path_finder: self.path_finder,
            stats: SimStats::default(),
            done_agents,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
