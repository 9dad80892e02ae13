use campus_core::CoreError;
use campus_graph::GraphError;
use campus_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown location {name:?} in {context}")]
    UnknownLocation { name: String, context: String },

    #[error("agent at position {position} has id {found}; ids must run 0..{count} in order")]
    AgentIdOrder { position: usize, found: u32, count: usize },

    #[error("schedule given for agent {0}, which does not exist")]
    UnknownAgent(u32),

    #[error("agent {agent} belongs to unknown class {class:?}")]
    UnknownClass { agent: u32, class: String },

    #[error("schedule for agent {agent}: {source}")]
    Schedule {
        agent:  u32,
        #[source]
        source: ScheduleError,
    },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("bad time value: {0}")]
    Clock(#[from] ScheduleError),

    #[error("config error: {0}")]
    Config(#[from] CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
