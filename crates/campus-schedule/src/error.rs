use thiserror::Error;

use campus_core::{LocationId, Tick};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error(
        "activity {index} starts at {start}, not after the previous activity ends at {previous_end}"
    )]
    InvalidOrdering {
        index:        usize,
        start:        Tick,
        previous_end: Tick,
    },

    #[error("activity {index} starts at {start}, outside the simulated day")]
    StartOutOfDay { index: usize, start: Tick },

    #[error("activity targets unknown location {0}")]
    UnknownLocation(LocationId),

    #[error("activity targets unknown location {0:?}")]
    UnknownLocationName(String),

    #[error("schedule row references unknown agent {0}")]
    UnknownAgent(u32),

    #[error("template slot {0} has no candidate destinations")]
    EmptySlot(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
