//! Points to visit.

use serde::{Deserialize, Serialize};

/// Identifier reserved for the synthetic live-position point.
pub const LIVE_POSITION_ID: &str = "user-location";

const LIVE_POSITION_LABEL: &str = "Current location";

/// An address with coordinates, as imported from the point source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    /// Caller-supplied distance carried as metadata. Never used for routing.
    pub reference_km: f64,
    pub visited: bool,
    pub in_sector: bool,
}

impl Point {
    pub fn new(id: impl Into<String>, label: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            lat,
            lng,
            reference_km: 0.0,
            visited: false,
            in_sector: false,
        }
    }

    pub fn with_reference_km(mut self, km: f64) -> Self {
        self.reference_km = km;
        self
    }

    /// Synthetic point standing in for the user's live position.
    pub fn live_position(location: (f64, f64)) -> Self {
        Self {
            id: LIVE_POSITION_ID.to_string(),
            label: LIVE_POSITION_LABEL.to_string(),
            lat: location.0,
            lng: location.1,
            reference_km: 0.0,
            visited: false,
            in_sector: true,
        }
    }

    /// Location as (lat, lng).
    pub fn location(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn is_live_position(&self) -> bool {
        self.id == LIVE_POSITION_ID
    }

    /// In the current sector and not yet visited.
    pub fn is_candidate(&self) -> bool {
        self.in_sector && !self.visited
    }
}
