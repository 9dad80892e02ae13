//! Resolve a [`ScenarioDoc`] into validated model values.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use campus_core::{AgentId, AgentRng, LocationId, MapPoint, SegmentId, SimConfig};
use campus_graph::{CampusGraph, CampusGraphBuilder, PathFinder};
use campus_schedule::{Activity, Destination, Schedule, ScheduleTemplate, TemplateSlot};
use campus_sim::{Sim, SimBuilder, SimResult};

use crate::document::{ActivityDoc, ScenarioDoc};
use crate::{ScenarioError, ScenarioResult, Timetable};

/// One agent as described by the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    pub id:         AgentId,
    pub name:       String,
    pub home:       LocationId,
    pub class_name: Option<String>,
}

/// Where an agent's schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Explicit,
    Timetable,
    Generated,
    Empty,
}

/// A fully resolved scenario.  Every location reference has been checked,
/// every schedule validated, and the config bounds verified.
pub struct Scenario {
    pub config:    SimConfig,
    pub graph:     CampusGraph,
    pub agents:    Vec<AgentInfo>,
    pub schedules: Vec<Schedule>,
    pub sources:   Vec<ScheduleSource>,
}

impl Scenario {
    /// Load and resolve a scenario file.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> ScenarioResult<Self> {
        let doc: ScenarioDoc = serde_json::from_reader(reader)?;
        Self::resolve(doc)
    }

    pub fn from_json_str(json: &str) -> ScenarioResult<Self> {
        let doc: ScenarioDoc = serde_json::from_str(json)?;
        Self::resolve(doc)
    }

    /// Turn a raw document into model values, failing on the first error.
    pub fn resolve(doc: ScenarioDoc) -> ScenarioResult<Self> {
        doc.config.validate()?;

        // ── Graph ─────────────────────────────────────────────────────────
        let mut builder = CampusGraphBuilder::with_capacity(doc.locations.len(), doc.edges.len() * 2);
        for (name, &[x, y]) in &doc.locations {
            builder.add_location(name, MapPoint::new(x, y))?;
        }
        for edge in &doc.edges {
            let context = format!("edge {}", edge.id);
            let from = lookup(&builder, &edge.start, &context)?;
            let to = lookup(&builder, &edge.end, &context)?;
            builder.add_segment(SegmentId(edge.id), from, to, edge.length, edge.time_cost)?;
        }
        let graph = builder.build();

        // ── Agents ────────────────────────────────────────────────────────
        let count = doc.agents.len();
        let mut agents = Vec::with_capacity(count);
        for (position, a) in doc.agents.iter().enumerate() {
            if a.id as usize != position {
                return Err(ScenarioError::AgentIdOrder { position, found: a.id, count });
            }
            let home = graph.location_id(&a.home).ok_or_else(|| ScenarioError::UnknownLocation {
                name:    a.home.clone(),
                context: format!("home of agent {}", a.id),
            })?;
            agents.push(AgentInfo {
                id: AgentId(a.id),
                name: a.name.clone(),
                home,
                class_name: a.class_name.clone(),
            });
        }
        if let Some((&id, _)) = doc.schedules.iter().find(|(id, _)| **id as usize >= count) {
            return Err(ScenarioError::UnknownAgent(id));
        }

        // ── Schedule sources ──────────────────────────────────────────────
        let timetable = doc
            .timetable
            .as_ref()
            .map(|t| Timetable::resolve(t, |name| graph.location_id(name)))
            .transpose()?;
        let template = doc
            .generate
            .as_ref()
            .map(|slots| build_template(slots, &graph))
            .transpose()?;

        let mut schedules = Vec::with_capacity(count);
        let mut sources = Vec::with_capacity(count);
        for agent in &agents {
            let raw = agent.id.0;
            let (schedule, source) = if let Some(docs) = doc.schedules.get(&raw) {
                let acts = explicit_activities(docs, agent, &graph)?;
                (Schedule::new(acts), ScheduleSource::Explicit)
            } else if let Some(class) = &agent.class_name {
                let acts = timetable
                    .as_ref()
                    .and_then(|t| t.activities(class, agent.home))
                    .ok_or_else(|| ScenarioError::UnknownClass { agent: raw, class: class.clone() })?;
                (Schedule::new(acts), ScheduleSource::Timetable)
            } else if let Some(template) = &template {
                let mut rng = AgentRng::new(doc.config.seed, agent.id);
                (template.generate(agent.home, &mut rng), ScheduleSource::Generated)
            } else {
                (Ok(Schedule::empty()), ScheduleSource::Empty)
            };
            let schedule =
                schedule.map_err(|e| ScenarioError::Schedule { agent: raw, source: e })?;

            debug!(agent = raw, activities = schedule.len(), ?source, "schedule resolved");
            schedules.push(schedule);
            sources.push(source);
        }

        info!(
            locations = graph.location_count(),
            edges     = graph.edge_count(),
            agents    = agents.len(),
            "scenario loaded"
        );

        Ok(Self { config: doc.config, graph, agents, schedules, sources })
    }

    /// Home location of every agent, in `AgentId` order.
    pub fn homes(&self) -> Vec<LocationId> {
        self.agents.iter().map(|a| a.home).collect()
    }

    /// Hand the resolved model to a [`SimBuilder`].
    pub fn into_sim<P: PathFinder>(self, path_finder: P) -> SimResult<Sim<P>> {
        let homes = self.homes();
        SimBuilder::new(self.config, self.graph, path_finder)
            .agents(homes)
            .schedules(self.schedules)
            .build()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lookup(builder: &CampusGraphBuilder, name: &str, context: &str) -> ScenarioResult<LocationId> {
    builder.location_id(name).ok_or_else(|| ScenarioError::UnknownLocation {
        name:    name.to_owned(),
        context: context.to_owned(),
    })
}

/// Resolve a target name, with `home` meaning the agent's home.
fn target(name: &str, agent: &AgentInfo, graph: &CampusGraph) -> ScenarioResult<LocationId> {
    let name = name.trim();
    if name == "home" {
        return Ok(agent.home);
    }
    graph.location_id(name).ok_or_else(|| ScenarioError::UnknownLocation {
        name:    name.to_owned(),
        context: format!("schedule of agent {}", agent.id),
    })
}

fn explicit_activities(
    docs: &[ActivityDoc],
    agent: &AgentInfo,
    graph: &CampusGraph,
) -> ScenarioResult<Vec<Activity>> {
    docs.iter()
        .map(|d| {
            Ok(Activity::new(
                target(&d.target, agent, graph)?,
                d.start_secs.to_tick()?,
                d.dwell_secs,
            ))
        })
        .collect()
}

fn build_template(
    slots: &[crate::document::SlotDoc],
    graph: &CampusGraph,
) -> ScenarioResult<ScheduleTemplate> {
    let slots = slots
        .iter()
        .map(|s| {
            let choices = s
                .choices
                .iter()
                .map(|name| match name.trim() {
                    "home" => Ok(Destination::Home),
                    other => graph.location_id(other).map(Destination::Location).ok_or_else(|| {
                        ScenarioError::UnknownLocation {
                            name:    other.to_owned(),
                            context: "generation template".to_owned(),
                        }
                    }),
                })
                .collect::<ScenarioResult<Vec<_>>>()?;
            Ok(TemplateSlot { start: s.start.to_tick()?, dwell_secs: s.dwell_secs, choices })
        })
        .collect::<ScenarioResult<Vec<_>>>()?;
    Ok(ScheduleTemplate::new(slots))
}
