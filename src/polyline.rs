//! Polyline representation for leg geometries.
//!
//! Points are always stored as (latitude, longitude). Routing services emit
//! (longitude, latitude); the swap happens once, in [`Polyline::from_lng_lat`].

use serde::{Deserialize, Serialize};

/// A leg geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a polyline from (latitude, longitude) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Creates a polyline from (longitude, latitude) pairs, swapping each.
    pub fn from_lng_lat(coordinates: &[(f64, f64)]) -> Self {
        Self {
            points: coordinates.iter().map(|&(lng, lat)| (lat, lng)).collect(),
        }
    }

    /// Two-point straight line between origin and destination.
    pub fn straight(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            points: vec![from, to],
        }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
