//! Great-circle distance, used when the road network cannot answer.
//!
//! Less accurate than OSRM (ignores roads) but always available.

use crate::error::LookupError;
use crate::traits::{RoadLeg, RouteLookup};

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average speed for fallback legs. [`estimated_minutes`] applies it
/// as exactly two minutes per kilometer.
pub const FALLBACK_SPEED_KMH: f64 = 30.0;

/// Great-circle distance in kilometers between two (lat, lng) points in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Fallback travel time in minutes: two minutes per kilometer.
pub fn estimated_minutes(km: f64) -> f64 {
    km * 2.0
}

/// A [`RouteLookup`] that never touches the network.
///
/// Answers every request with the straight-line estimate. Useful for offline
/// runs and as a deterministic lookup in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineLookup;

impl RouteLookup for HaversineLookup {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        let km = haversine_km(from, to);
        Ok(RoadLeg {
            distance_m: km * 1000.0,
            duration_s: estimated_minutes(km) * 60.0,
            coordinates: vec![(from.1, from.0), (to.1, to.0)],
        })
    }
}
