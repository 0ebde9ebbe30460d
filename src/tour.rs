//! Legs and tours produced by the sequencer.

use serde::Serialize;

use crate::haversine::{estimated_minutes, haversine_km};
use crate::point::Point;
use crate::polyline::Polyline;
use crate::traits::RoadLeg;

/// Where a leg's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegSource {
    /// Road-network routing lookup.
    Network,
    /// Haversine fallback.
    Estimated,
    /// Diagonal entry; a point to itself.
    Stationary,
}

/// Directed edge between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from: Point,
    pub to: Point,
    pub distance_km: f64,
    pub duration_min: f64,
    pub geometry: Polyline,
    pub source: LegSource,
}

impl Leg {
    /// Zero-cost leg from a point to itself.
    pub fn stationary(point: &Point) -> Self {
        Self {
            from: point.clone(),
            to: point.clone(),
            distance_km: 0.0,
            duration_min: 0.0,
            geometry: Polyline::default(),
            source: LegSource::Stationary,
        }
    }

    /// Normalizes a routing service answer to km / minutes / (lat, lng).
    pub fn from_road(from: &Point, to: &Point, road: RoadLeg) -> Self {
        Self {
            from: from.clone(),
            to: to.clone(),
            distance_km: road.distance_m / 1000.0,
            duration_min: road.duration_s / 60.0,
            geometry: Polyline::from_lng_lat(&road.coordinates),
            source: LegSource::Network,
        }
    }

    /// Straight-line estimate used when the lookup fails.
    pub fn estimated(from: &Point, to: &Point) -> Self {
        let km = haversine_km(from.location(), to.location());
        Self {
            from: from.clone(),
            to: to.clone(),
            distance_km: km,
            duration_min: estimated_minutes(km),
            geometry: Polyline::straight(from.location(), to.location()),
            source: LegSource::Estimated,
        }
    }
}

/// Visiting order plus the legs joining it.
///
/// Without a live position `legs[i]` joins `points[i]` to `points[i + 1]`.
/// With one, the live position is stripped from `points` but its outgoing
/// leg is kept, so `legs.len() == points.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tour {
    pub points: Vec<Point>,
    pub legs: Vec<Leg>,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
}

impl Tour {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 1-based position of a point in the visiting order.
    pub fn ordinal_of(&self, id: &str) -> Option<usize> {
        self.points.iter().position(|p| p.id == id).map(|i| i + 1)
    }

    /// Legs that used the haversine fallback.
    pub fn estimated_legs(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| leg.source == LegSource::Estimated)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_leg_is_normalized() {
        let a = Point::new("a", "", -38.73, -72.59);
        let b = Point::new("b", "", -38.74, -72.60);
        let leg = Leg::from_road(
            &a,
            &b,
            RoadLeg {
                distance_m: 2500.0,
                duration_s: 300.0,
                coordinates: vec![(-72.59, -38.73), (-72.60, -38.74)],
            },
        );
        assert_eq!(leg.distance_km, 2.5);
        assert_eq!(leg.duration_min, 5.0);
        assert_eq!(leg.geometry.points(), &[(-38.73, -72.59), (-38.74, -72.60)]);
        assert_eq!(leg.source, LegSource::Network);
    }

    #[test]
    fn estimated_leg_is_straight_line() {
        let a = Point::new("a", "", 0.0, 0.0);
        let b = Point::new("b", "", 0.0, 1.0);
        let leg = Leg::estimated(&a, &b);
        assert!((leg.distance_km - 111.19).abs() < 0.1);
        assert_eq!(leg.duration_min, 2.0 * leg.distance_km);
        assert_eq!(leg.geometry.points(), &[(0.0, 0.0), (0.0, 1.0)]);
    }

    #[test]
    fn estimated_duration_is_exactly_twice_the_distance() {
        let origin = Point::new("o", "", -38.7390, -72.5905);
        for step in 1..200 {
            let offset = step as f64 * 0.0137;
            let to = Point::new("t", "", -38.7390 + offset, -72.5905 - offset / 3.0);
            let leg = Leg::estimated(&origin, &to);
            assert_eq!(leg.duration_min, 2.0 * leg.distance_km, "step {step}");
        }
    }

    #[test]
    fn ordinal_is_one_based() {
        let tour = Tour {
            points: vec![Point::new("x", "", 0.0, 0.0), Point::new("y", "", 0.0, 0.0)],
            ..Tour::default()
        };
        assert_eq!(tour.ordinal_of("y"), Some(2));
        assert_eq!(tour.ordinal_of("z"), None);
    }
}
