//! Sequencer behaviour through the public API.
//!
//! Covers matrix direction independence, the haversine fallback, tour shape
//! with and without a live position, and the no-op guard.

use std::collections::HashMap;
use std::sync::Mutex;

use route_sequencer::error::LookupError;
use route_sequencer::matrix::{LegMatrix, LookupMode};
use route_sequencer::planner::RoutePlanner;
use route_sequencer::sector::Sector;
use route_sequencer::traits::{RoadLeg, RouteLookup};
use route_sequencer::{LIVE_POSITION_ID, LegSource, Point, SolveOptions, solve};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Lookup that fails every request.
struct Unreachable;

impl RouteLookup for Unreachable {
    fn route(&self, _from: (f64, f64), _to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        Err(LookupError::Status(503))
    }
}

/// Lookup answering from a table of (from, to) -> km, failing on misses.
/// Records every request it sees.
#[derive(Default)]
struct TableLookup {
    km: HashMap<(String, String), f64>,
    calls: Mutex<Vec<(String, String)>>,
}

fn key(location: (f64, f64)) -> String {
    format!("{:.6},{:.6}", location.0, location.1)
}

impl TableLookup {
    fn with(mut self, from: &Point, to: &Point, km: f64) -> Self {
        self.km.insert((key(from.location()), key(to.location())), km);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl RouteLookup for TableLookup {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        let pair = (key(from), key(to));
        self.calls.lock().unwrap().push(pair.clone());
        match self.km.get(&pair) {
            Some(&km) => Ok(RoadLeg {
                distance_m: km * 1000.0,
                // 1 minute per km
                duration_s: km * 60.0,
                coordinates: vec![(from.1, from.0), (to.1, to.0)],
            }),
            None => Err(LookupError::NoRoute),
        }
    }
}

/// Lookup where distance is |Δlat| * 100 km, so 0.01° == 1 km.
struct Linear;

impl RouteLookup for Linear {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        let meters = ((to.0 - from.0).abs() * 100_000.0).round();
        Ok(RoadLeg {
            distance_m: meters,
            duration_s: meters * 0.12,
            coordinates: vec![(from.1, from.0), (to.1, to.0)],
        })
    }
}

/// [`Linear`], except a -> b answers with a NaN distance and b -> c with a
/// negative duration (a, b, c at 0, 1 and 2 km).
struct Garbled;

impl RouteLookup for Garbled {
    fn route(&self, from: (f64, f64), to: (f64, f64)) -> Result<RoadLeg, LookupError> {
        let mut leg = Linear.route(from, to)?;
        if from.0 == 0.0 && to.0 == 0.01 {
            leg.distance_m = f64::NAN;
        }
        if from.0 == 0.01 && to.0 == 0.02 {
            leg.duration_s = -1.0;
        }
        Ok(leg)
    }
}

fn at_km(id: &str, km: f64) -> Point {
    Point::new(id, id, km / 100.0, 0.0)
}

fn ids(points: &[Point]) -> Vec<&str> {
    points.iter().map(|p| p.id.as_str()).collect()
}

fn sequential() -> SolveOptions {
    SolveOptions::default()
}

// ============================================================================
// Matrix
// ============================================================================

#[test]
fn directions_are_resolved_independently() {
    let a = Point::new("a", "A", 1.0, 1.0);
    let b = Point::new("b", "B", 2.0, 2.0);
    let lookup = TableLookup::default().with(&a, &b, 3.0).with(&b, &a, 7.5);

    let matrix = LegMatrix::build(&[a, b], &lookup);

    assert_eq!(matrix.distance_km(0, 1), 3.0);
    assert_eq!(matrix.distance_km(1, 0), 7.5);
    assert_eq!(lookup.call_count(), 2, "one lookup per ordered pair");
}

#[test]
fn diagonal_is_never_looked_up() {
    let points = vec![at_km("a", 0.0), at_km("b", 1.0), at_km("c", 2.0)];
    let lookup = TableLookup::default();
    LegMatrix::build(&points, &lookup);
    assert_eq!(lookup.call_count(), 6);
}

#[test]
fn failing_lookup_uses_haversine() {
    let points = vec![Point::new("a", "", 0.0, 0.0), Point::new("b", "", 0.0, 1.0)];
    let tour = solve(&points, None, &Unreachable, &sequential())
        .unwrap()
        .unwrap();

    let leg = &tour.legs[0];
    assert_eq!(leg.source, LegSource::Estimated);
    assert!((leg.distance_km - 111.19).abs() < 0.1, "got {}", leg.distance_km);
    assert_eq!(leg.duration_min, 2.0 * leg.distance_km);
    assert_eq!(leg.geometry.points(), &[(0.0, 0.0), (0.0, 1.0)]);
}

#[test]
fn partial_failures_mix_sources() {
    let a = at_km("a", 0.0);
    let b = at_km("b", 1.0);
    let lookup = TableLookup::default().with(&a, &b, 1.4);

    let tour = solve(&[a, b], None, &lookup, &sequential())
        .unwrap()
        .unwrap();

    assert_eq!(tour.legs[0].source, LegSource::Network);
    assert!((tour.legs[0].distance_km - 1.4).abs() < 1e-9);
    assert!((tour.legs[0].duration_min - 1.4).abs() < 1e-9);
}

#[test]
fn unusable_lookup_numbers_fall_back_to_haversine() {
    let points = vec![at_km("a", 0.0), at_km("b", 1.0), at_km("c", 2.0)];
    let tour = solve(&points, None, &Garbled, &sequential())
        .unwrap()
        .unwrap();

    assert_eq!(ids(&tour.points), vec!["a", "b", "c"]);
    assert_eq!(tour.legs[0].source, LegSource::Estimated);
    assert_eq!(tour.legs[1].source, LegSource::Estimated);
    assert!((tour.legs[0].distance_km - 1.112).abs() < 0.01);
    assert!(tour.total_distance_km.is_finite());
    assert!(tour.total_duration_min >= 0.0);

    let matrix = LegMatrix::build(&points, &Garbled);
    assert_eq!(matrix.leg(0, 2).source, LegSource::Network);
}

#[test]
fn network_geometry_is_lat_lng() {
    let a = Point::new("a", "", -38.73, -72.59);
    let b = Point::new("b", "", -38.74, -72.60);
    let tour = solve(&[a, b], None, &Linear, &sequential())
        .unwrap()
        .unwrap();
    assert_eq!(tour.legs[0].geometry.points(), &[(-38.73, -72.59), (-38.74, -72.60)]);
}

#[test]
fn parallel_mode_matches_sequential() {
    let points: Vec<Point> = [0.0, 7.0, 3.0, 9.0, 1.0, 4.0]
        .iter()
        .enumerate()
        .map(|(i, km)| at_km(&format!("p{i}"), *km))
        .collect();

    let sequential_tour = solve(&points, Some((0.05, 0.0)), &Linear, &sequential())
        .unwrap()
        .unwrap();
    let parallel_tour = solve(
        &points,
        Some((0.05, 0.0)),
        &Linear,
        &SolveOptions {
            lookup_mode: LookupMode::Parallel,
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(sequential_tour, parallel_tour);
}

// ============================================================================
// Tour shape
// ============================================================================

#[test]
fn tour_visits_every_candidate_once() {
    let points: Vec<Point> = [5.0, 2.0, 8.0, 1.0, 9.5, 3.3, 7.1]
        .iter()
        .enumerate()
        .map(|(i, km)| at_km(&format!("p{i}"), *km))
        .collect();

    let tour = solve(&points, None, &Linear, &sequential())
        .unwrap()
        .unwrap();

    assert_eq!(tour.points.len(), points.len());
    assert_eq!(tour.legs.len(), points.len() - 1);
    assert_eq!(tour.points[0].id, "p0", "tour starts at the first candidate");

    let mut visited = ids(&tour.points);
    visited.sort();
    let mut expected = ids(&points);
    expected.sort();
    assert_eq!(visited, expected);

    for (i, leg) in tour.legs.iter().enumerate() {
        assert_eq!(leg.from.id, tour.points[i].id);
        assert_eq!(leg.to.id, tour.points[i + 1].id);
    }
}

#[test]
fn colinear_points_are_visited_in_order() {
    let points = vec![at_km("0", 0.0), at_km("10", 10.0), at_km("1", 1.0)];
    let tour = solve(&points, None, &Linear, &sequential())
        .unwrap()
        .unwrap();

    assert_eq!(ids(&tour.points), vec!["0", "1", "10"]);
    assert!((tour.total_distance_km - 10.0).abs() < 1e-9);
}

#[test]
fn totals_are_sums_of_legs() {
    let points = vec![at_km("a", 0.0), at_km("b", 4.0), at_km("c", 6.0), at_km("d", 5.0)];
    let tour = solve(&points, None, &Linear, &sequential())
        .unwrap()
        .unwrap();

    let distance: f64 = tour.legs.iter().map(|l| l.distance_km).sum();
    let duration: f64 = tour.legs.iter().map(|l| l.duration_min).sum();
    assert!((tour.total_distance_km - distance).abs() < 1e-9);
    assert!((tour.total_duration_min - duration).abs() < 1e-9);
}

#[test]
fn greedy_is_not_optimal() {
    // Greedy: 0 -> 1 -> -2 -> 5 = 11 km. Visiting -2 first would give 9 km.
    let points = vec![at_km("s", 0.0), at_km("a", 1.0), at_km("b", -2.0), at_km("c", 5.0)];
    let tour = solve(&points, None, &Linear, &sequential())
        .unwrap()
        .unwrap();
    assert_eq!(ids(&tour.points), vec!["s", "a", "b", "c"]);
    assert!((tour.total_distance_km - 11.0).abs() < 1e-9);
}

#[test]
fn equal_distances_go_to_lowest_input_index() {
    let points = vec![
        at_km("start", 0.0),
        at_km("far", 9.0),
        at_km("north", 1.0),
        at_km("south", -1.0),
    ];
    let tour = solve(&points, None, &Linear, &sequential())
        .unwrap()
        .unwrap();
    assert_eq!(tour.points[1].id, "north");
}

// ============================================================================
// Live position
// ============================================================================

#[test]
fn live_position_is_stripped_but_its_leg_is_kept() {
    let points = vec![at_km("a", 5.0), at_km("b", 1.0)];
    let tour = solve(&points, Some((0.0, 0.0)), &Linear, &sequential())
        .unwrap()
        .unwrap();

    assert!(tour.points.iter().all(|p| p.id != LIVE_POSITION_ID));
    assert_eq!(ids(&tour.points), vec!["b", "a"], "live position seeds the walk");

    // Deliberate asymmetry: one leg per returned point.
    assert_eq!(tour.legs.len(), tour.points.len());
    assert!(tour.legs[0].from.is_live_position());
    assert_eq!(tour.legs[0].to.id, "b");

    // live -> b (1 km) + b -> a (4 km)
    assert!((tour.total_distance_km - 5.0).abs() < 1e-9);
    let duration: f64 = tour.legs.iter().map(|l| l.duration_min).sum();
    assert!((tour.total_duration_min - duration).abs() < 1e-9);
}

#[test]
fn live_position_overrides_first_candidate_as_start() {
    let points = vec![at_km("first", 10.0), at_km("near", 0.5)];
    let tour = solve(&points, Some((0.0, 0.0)), &Linear, &sequential())
        .unwrap()
        .unwrap();
    assert_eq!(tour.points[0].id, "near");
}

// ============================================================================
// No-op guard
// ============================================================================

#[test]
fn too_few_candidates_is_noop() {
    assert!(solve(&[], None, &Linear, &sequential()).unwrap().is_none());
    assert!(solve(&[at_km("a", 0.0)], None, &Linear, &sequential())
        .unwrap()
        .is_none());
    // the live position alone is a single working point
    assert!(solve(&[], Some((0.0, 0.0)), &Linear, &sequential())
        .unwrap()
        .is_none());
}

#[test]
fn noop_keeps_previous_tour() {
    let mut planner = RoutePlanner::new();
    planner.load_points(vec![at_km("a", 0.0), at_km("b", 1.0), at_km("c", 2.0)]);
    planner.select_sector(Sector::from_corners((-1.0, -1.0), (1.0, 1.0)));

    let first = planner
        .calculate_route(&Linear, &sequential())
        .unwrap()
        .cloned()
        .unwrap();

    // Visit two of three; one candidate left.
    planner.toggle_visited("a");
    planner.toggle_visited("b");
    assert_eq!(planner.candidates().len(), 1);

    let after = planner
        .calculate_route(&Linear, &sequential())
        .unwrap()
        .cloned()
        .unwrap();

    assert_eq!(after, first);
    assert_eq!(after.total_distance_km, first.total_distance_km);
    assert_eq!(after.total_duration_min, first.total_duration_min);
}

#[test]
fn noop_does_not_call_lookup() {
    let lookup = TableLookup::default();
    assert!(solve(&[at_km("a", 0.0)], None, &lookup, &sequential())
        .unwrap()
        .is_none());
    assert_eq!(lookup.call_count(), 0);
}
