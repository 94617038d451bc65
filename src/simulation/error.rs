//! Errors raised by the simulation core

use thiserror::Error;

use super::types::{IntersectionId, RoadId};

/// Everything the core can refuse to do.
///
/// The runtime variants are modeling errors, never transient conditions:
/// once one is returned the run is over.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("Intersection redefined: {0}")]
    DuplicateIntersection(String),

    #[error("No such intersection: {0}")]
    UnknownIntersection(String),

    #[error("Intersection {0:?} not found")]
    MissingIntersection(IntersectionId),

    #[error("Road {0:?} not found")]
    MissingRoad(RoadId),

    #[error("Vehicle arrived at: {0}")]
    ArrivalAtSource(String),

    #[error("Vehicle departed from: {0}")]
    DepartureFromSink(String),

    #[error("Vehicle departed from empty: {0}")]
    DepartureFromEmpty(String),

    #[error("Light change at: {0}")]
    NotAStopLight(String),

    #[error("No outgoing road from: {0}")]
    NoOutgoingRoad(String),

    #[error("Cannot draw a random number from an empty range")]
    EmptyRange,
}
