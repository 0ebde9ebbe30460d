//! Data handed to the map renderer.
//!
//! The frame is a snapshot; renderers never see planner internals and the
//! planner never holds a drawing handle.

use serde::Serialize;

use crate::point::Point;
use crate::polyline::Polyline;
use crate::sector::Sector;
use crate::tour::Tour;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStatus {
    Visited,
    InSector,
    Outside,
}

impl MarkerStatus {
    fn of(point: &Point) -> Self {
        if point.visited {
            Self::Visited
        } else if point.in_sector {
            Self::InSector
        } else {
            Self::Outside
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub label: String,
    pub location: (f64, f64),
    pub reference_km: f64,
    pub status: MarkerStatus,
    /// 1-based position in the current tour.
    pub ordinal: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub from_id: String,
    pub to_id: String,
    pub geometry: Polyline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapFrame {
    pub markers: Vec<Marker>,
    pub lines: Vec<RouteLine>,
    pub sector: Option<Sector>,
    pub live_position: Option<(f64, f64)>,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
}

impl MapFrame {
    pub fn build(
        points: &[Point],
        tour: Option<&Tour>,
        sector: Option<Sector>,
        live_position: Option<(f64, f64)>,
    ) -> Self {
        // Points left at 0,0 by the importer have no usable location.
        let markers: Vec<Marker> = points
            .iter()
            .filter(|point| point.lat != 0.0 && point.lng != 0.0)
            .map(|point| Marker {
                id: point.id.clone(),
                label: point.label.clone(),
                location: point.location(),
                reference_km: point.reference_km,
                status: MarkerStatus::of(point),
                ordinal: tour.and_then(|t| t.ordinal_of(&point.id)),
            })
            .collect();

        let lines: Vec<RouteLine> = tour
            .map(|t| {
                t.legs
                    .iter()
                    .map(|leg| RouteLine {
                        from_id: leg.from.id.clone(),
                        to_id: leg.to.id.clone(),
                        geometry: leg.geometry.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            markers,
            lines,
            sector,
            live_position,
            total_distance_km: tour.map_or(0.0, |t| t.total_distance_km),
            total_duration_min: tour.map_or(0.0, |t| t.total_duration_min),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{:.2} km, {:.0} min",
            self.total_distance_km, self.total_duration_min
        )
    }
}
