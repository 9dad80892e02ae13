use campus_agent::AgentError;
use campus_core::{AgentId, CoreError, LocationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {agent} references unknown location {location}")]
    UnknownLocation { agent: AgentId, location: LocationId },
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        SimError::Config(e.to_string())
    }
}

impl From<AgentError> for SimError {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::UnknownHome { agent, home } => {
                SimError::UnknownLocation { agent, location: home }
            }
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
