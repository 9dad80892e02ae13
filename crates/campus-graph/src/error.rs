//! Graph-subsystem error type.

use thiserror::Error;

use campus_core::{LocationId, MapPoint, SegmentId};

/// Errors produced by `campus-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("location {0} not found in graph")]
    UnknownLocation(LocationId),

    #[error("no location named {0:?}")]
    UnknownLocationName(String),

    #[error("location name {0:?} is defined twice")]
    DuplicateLocation(String),

    #[error("location {name:?} has point {point} outside the normalized map")]
    InvalidPoint { name: String, point: MapPoint },

    #[error("segment {segment} is invalid: length {length}, time cost {time_cost}")]
    InvalidEdge {
        segment:   SegmentId,
        length:    f64,
        time_cost: f64,
    },

    #[error("no route from {from} to {to}")]
    NoRoute { from: LocationId, to: LocationId },
}

pub type GraphResult<T> = Result<T, GraphError>;
