//! route-sequencer
//!
//! Orders the points inside a map sector into a visiting route: a leg matrix
//! from OSRM (haversine when OSRM can't answer), walked nearest-neighbor.

pub mod config;
pub mod error;
pub mod geolocation;
pub mod haversine;
pub mod import;
pub mod matrix;
pub mod osrm;
pub mod planner;
pub mod point;
pub mod polyline;
pub mod render;
pub mod sector;
pub mod session;
pub mod solver;
pub mod tour;
pub mod traits;

pub use error::{LookupError, PlannerError, SequenceError};
pub use point::{LIVE_POSITION_ID, Point};
pub use solver::{SolveOptions, solve};
pub use tour::{Leg, LegSource, Tour};
