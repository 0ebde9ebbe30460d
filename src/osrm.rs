//! OSRM HTTP adapter for point-to-point legs.

use serde::Deserialize;
use tracing::trace;

use crate::error::LookupError;
use crate::traits::{RoadLeg, RouteLookup};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }
}

impl RouteLookup for OsrmClient {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        let url = self.route_url(from, to);
        trace!(%url, "requesting OSRM route");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|err| LookupError::Malformed(err.to_string()))?;
        parsed.into_leg()
    }
}

/// OSRM Route API response. Only the fields the sequencer reads.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    pub geometry: OsrmGeometry,
}

/// GeoJSON LineString, coordinates as [lng, lat].
#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Take the first route, rejecting anything the matrix can't use.
    pub fn into_leg(self) -> Result<RoadLeg, LookupError> {
        if !self.is_ok() {
            return Err(LookupError::Rejected {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let route = self.routes.into_iter().next().ok_or(LookupError::NoRoute)?;
        let leg = RoadLeg {
            distance_m: route.distance,
            duration_s: route.duration,
            coordinates: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| (lng, lat))
                .collect(),
        };
        leg.validate()?;
        Ok(leg)
    }
}
