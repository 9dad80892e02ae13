use campus_core::{AgentId, LocationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {agent} has home {home}, which is not in the graph")]
    UnknownHome { agent: AgentId, home: LocationId },
}

pub type AgentResult<T> = Result<T, AgentError>;
