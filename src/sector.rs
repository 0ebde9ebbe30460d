//! Rectangular sector selection.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Axis-aligned lat/lng rectangle. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Sector {
    /// Build from any two opposite (lat, lng) corners.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            south: a.0.min(b.0),
            west: a.1.min(b.1),
            north: a.0.max(b.0),
            east: a.1.max(b.1),
        }
    }

    pub fn contains(&self, location: (f64, f64)) -> bool {
        let (lat, lng) = location;
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }

    /// (south-west, north-east) corners.
    pub fn corners(&self) -> ((f64, f64), (f64, f64)) {
        ((self.south, self.west), (self.north, self.east))
    }
}

/// Recompute `in_sector` for every point.
pub fn apply_sector(points: &mut [Point], sector: &Sector) {
    for point in points.iter_mut() {
        point.in_sector = sector.contains(point.location());
    }
}

/// Pure form of [`apply_sector`].
pub fn with_sector(points: &[Point], sector: &Sector) -> Vec<Point> {
    let mut updated = points.to_vec();
    apply_sector(&mut updated, sector);
    updated
}
