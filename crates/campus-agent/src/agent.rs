//! The per-agent state machine.

use campus_core::{AgentId, EdgeId, LocationId, MapPoint, Tick, UnreachablePolicy, smoothstep};
use campus_graph::{CampusGraph, PathFinder, Route};
use campus_schedule::{Activity, Schedule};

use crate::{AgentError, AgentResult, AgentState, AgentView, Position, StepEvents, StepOutcome};

/// One simulated person.
///
/// `location` is the last location the agent stood at.  While waiting or
/// dwelling it equals `position.location()`; while travelling it is the
/// start of the current edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id:              AgentId,
    pub home:            LocationId,
    pub state:           AgentState,
    pub position:        Position,
    pub location:        LocationId,
    /// Index of the current activity in the agent's schedule.
    pub schedule_cursor: usize,
    /// Seconds of dwell left at the current target.
    pub remaining_dwell: u32,
    /// Tick at which the current edge was entered.
    pub segment_start:   Tick,
    /// Failed route lookups over the whole run.
    pub unreachable_ticks: u64,

    route:              Route,
    route_cursor:       usize,
    /// Consecutive failed lookups for the current activity.
    unreachable_streak: u32,
}

impl Agent {
    /// A fresh agent standing at `home`.  An empty schedule starts it `Done`.
    pub fn new(
        id: AgentId,
        home: LocationId,
        schedule: &Schedule,
        graph: &CampusGraph,
    ) -> AgentResult<Self> {
        if !graph.contains(home) {
            return Err(AgentError::UnknownHome { agent: id, home });
        }
        let state = if schedule.is_empty() { AgentState::Done } else { AgentState::Waiting };
        Ok(Self {
            id,
            home,
            state,
            position: Position::At(home),
            location: home,
            schedule_cursor: 0,
            remaining_dwell: 0,
            segment_start: Tick::ZERO,
            unreachable_ticks: 0,
            route: Route::default(),
            route_cursor: 0,
            unreachable_streak: 0,
        })
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == AgentState::Done
    }

    /// The route being walked, empty unless travelling.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Edges not yet completed, starting with the current one.
    pub fn remaining_edges(&self) -> &[EdgeId] {
        self.route.edges.get(self.route_cursor..).unwrap_or(&[])
    }

    pub fn point(&self, graph: &CampusGraph) -> MapPoint {
        self.position.point(graph)
    }

    pub fn view(&self, graph: &CampusGraph) -> AgentView {
        AgentView {
            id:              self.id,
            point:           self.point(graph),
            state:           self.state,
            schedule_cursor: self.schedule_cursor,
        }
    }

    // ── Transition ────────────────────────────────────────────────────────────

    /// Advance the agent over the second ending at `now`.
    ///
    /// `schedule` must be the agent's own schedule; the driver calls this
    /// once per agent per tick with strictly increasing `now`.
    pub fn step<P: PathFinder + ?Sized>(
        &mut self,
        now: Tick,
        schedule: &Schedule,
        graph: &CampusGraph,
        finder: &P,
        policy: UnreachablePolicy,
    ) -> StepEvents {
        let mut events = StepEvents::default();
        if self.state == AgentState::Done {
            return events;
        }
        let Some(activity) = schedule.get(self.schedule_cursor).copied() else {
            self.state = AgentState::Done;
            return events;
        };

        let outcome = match self.state {
            AgentState::Waiting => {
                self.step_waiting(now, &activity, schedule, graph, finder, policy, &mut events)
            }
            AgentState::Traveling => self.step_traveling(now, &activity, schedule, graph, &mut events),
            AgentState::Dwelling  => self.step_dwelling(schedule),
            AgentState::Done      => StepOutcome::Idle,
        };
        events.outcome = outcome;
        events
    }

    #[allow(clippy::too_many_arguments)]
    fn step_waiting<P: PathFinder + ?Sized>(
        &mut self,
        now: Tick,
        activity: &Activity,
        schedule: &Schedule,
        graph: &CampusGraph,
        finder: &P,
        policy: UnreachablePolicy,
        events: &mut StepEvents,
    ) -> StepOutcome {
        if now < activity.start {
            return StepOutcome::Idle;
        }
        // The activity began inside this tick's interval, or before it.
        let began = activity.start.max(now.prev());

        if self.location == activity.target {
            self.unreachable_streak = 0;
            self.position = Position::At(activity.target);
            return self.begin_dwell(activity.dwell_secs, began < now, schedule, events);
        }

        match finder.route(graph, self.location, activity.target) {
            // An empty route between distinct locations leads nowhere; it is
            // handled like a failed lookup below.
            Ok(route) if !route.is_empty() => {
                self.unreachable_streak = 0;
                self.route = route;
                self.route_cursor = 0;
                self.segment_start = began;
                self.state = AgentState::Traveling;
                events.departed = true;
                match self.step_traveling(now, activity, schedule, graph, events) {
                    StepOutcome::Moved => StepOutcome::Departed,
                    other => other,
                }
            }
            Ok(_) | Err(_) => {
                self.unreachable_ticks += 1;
                self.unreachable_streak += 1;
                match policy {
                    UnreachablePolicy::Retry => StepOutcome::Unreachable {
                        target: activity.target,
                        first:  self.unreachable_streak == 1,
                    },
                    UnreachablePolicy::Skip => {
                        self.complete_activity(schedule);
                        StepOutcome::Skipped { target: activity.target }
                    }
                }
            }
        }
    }

    fn step_traveling(
        &mut self,
        now: Tick,
        activity: &Activity,
        schedule: &Schedule,
        graph: &CampusGraph,
        events: &mut StepEvents,
    ) -> StepOutcome {
        let Some(edge) = self.route.edge(self.route_cursor) else {
            return self.arrive(activity, schedule, events);
        };

        let time_cost = graph.edge_time_cost[edge.index()];
        let progress = if time_cost > 0.0 {
            (now.since(self.segment_start) as f64 / time_cost).min(1.0) as f32
        } else {
            1.0
        };
        self.position = Position::OnEdge { edge, progress, fraction: smoothstep(progress) };

        if progress < 1.0 {
            return StepOutcome::Moved;
        }

        self.route_cursor += 1;
        self.location = graph.edge_to[edge.index()];
        if self.route_cursor < self.route.len() {
            // Held at the junction; the next edge starts counting from here.
            self.segment_start = now;
            return StepOutcome::Moved;
        }
        self.arrive(activity, schedule, events)
    }

    fn step_dwelling(&mut self, schedule: &Schedule) -> StepOutcome {
        self.remaining_dwell = self.remaining_dwell.saturating_sub(1);
        if self.remaining_dwell == 0 {
            self.complete_activity(schedule)
        } else {
            StepOutcome::Dwelled
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn arrive(&mut self, activity: &Activity, schedule: &Schedule, events: &mut StepEvents) -> StepOutcome {
        self.location = activity.target;
        self.position = Position::At(activity.target);
        self.route = Route::default();
        self.route_cursor = 0;
        self.begin_dwell(activity.dwell_secs, false, schedule, events)
    }

    /// Enter `Dwelling`.  With `count_now` the current tick already counts
    /// as the first dwell second.
    fn begin_dwell(
        &mut self,
        dwell_secs: u32,
        count_now: bool,
        schedule: &Schedule,
        events: &mut StepEvents,
    ) -> StepOutcome {
        events.arrived = true;
        self.state = AgentState::Dwelling;
        self.remaining_dwell = dwell_secs;
        if dwell_secs == 0 {
            return self.complete_activity(schedule);
        }
        if count_now {
            self.remaining_dwell -= 1;
            if self.remaining_dwell == 0 {
                return self.complete_activity(schedule);
            }
        }
        StepOutcome::Arrived
    }

    fn complete_activity(&mut self, schedule: &Schedule) -> StepOutcome {
        self.schedule_cursor += 1;
        self.remaining_dwell = 0;
        self.unreachable_streak = 0;
        self.route = Route::default();
        self.route_cursor = 0;
        if self.schedule_cursor >= schedule.len() {
            self.state = AgentState::Done;
            StepOutcome::Finished
        } else {
            self.state = AgentState::Waiting;
            StepOutcome::ActivityCompleted
        }
    }
}
