//! Collaborator interfaces for the route sequencer.
//!
//! The sequencer itself is a pure function of its inputs; everything that
//! touches the network, the device, or the screen sits behind one of these
//! traits so callers and tests can swap implementations.

use crate::error::LookupError;
use crate::geolocation::{PositionError, PositionOptions};
use crate::render::MapFrame;

/// A leg as reported by a road-network routing service, in service units.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadLeg {
    /// Distance in meters.
    pub distance_m: f64,
    /// Duration in seconds.
    pub duration_s: f64,
    /// Path as (lng, lat) pairs, the order routing services emit.
    pub coordinates: Vec<(f64, f64)>,
}

impl RoadLeg {
    /// Rejects legs the matrix can't use: non-finite or negative distance or
    /// duration.
    pub fn validate(&self) -> Result<(), LookupError> {
        if !self.distance_m.is_finite() || self.distance_m < 0.0 {
            return Err(LookupError::Malformed(format!(
                "invalid distance {}",
                self.distance_m
            )));
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(LookupError::Malformed(format!(
                "invalid duration {}",
                self.duration_s
            )));
        }
        Ok(())
    }
}

/// Resolves a road-network leg between two (lat, lng) coordinates.
///
/// Each call is independent; the A->B and B->A lookups may disagree.
pub trait RouteLookup {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError>;
}

impl<T: RouteLookup + ?Sized> RouteLookup for &T {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        (**self).route(from, to)
    }
}

impl<T: RouteLookup + ?Sized> RouteLookup for Box<T> {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        (**self).route(from, to)
    }
}

/// Presentation layer. Receives data only; owns all drawing handles.
pub trait MapRenderer {
    fn render(&mut self, frame: &MapFrame);
}

/// One-shot request for the device's current (lat, lng).
pub trait PositionSource {
    fn current_position(&self, options: &PositionOptions) -> Result<(f64, f64), PositionError>;
}
