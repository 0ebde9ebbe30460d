//! Error types shared across the sequencer.
//!
//! Lookup failures never leave the matrix builder (they trigger the
//! haversine fallback). Sequencing and planner errors reach the caller.

use thiserror::Error;

/// Why a routing lookup could not produce a leg.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport failure, including timeouts.
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("routing service answered with status {0}")]
    Status(u16),
    #[error("malformed routing response: {0}")]
    Malformed(String),
    /// The service parsed the request but refused it (OSRM `code` != "Ok").
    #[error("routing service rejected request ({code}): {message}")]
    Rejected { code: String, message: String },
    #[error("routing service returned no route")]
    NoRoute,
}

/// Unexpected failure while building a tour. No partial tour is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("point {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },
    #[error("point id {id} is reserved for the live position")]
    ReservedId { id: String },
}

/// Errors surfaced by the planner workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// A calculation is already in flight.
    #[error("a route calculation is already in progress")]
    Busy,
    #[error("no route calculation is in progress")]
    NotComputing,
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}
