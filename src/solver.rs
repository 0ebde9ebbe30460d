//! Nearest-neighbor route sequencing.
//!
//! Builds the full leg matrix for the candidate set (plus the live position,
//! when given), then walks it greedily from index 0.

use tracing::info;

use crate::error::SequenceError;
use crate::matrix::{LegMatrix, LookupMode};
use crate::point::{LIVE_POSITION_ID, Point};
use crate::tour::Tour;
use crate::traits::RouteLookup;

/// Fewest working points (live position included) worth routing.
pub const MIN_ROUTE_POINTS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub lookup_mode: LookupMode,
}

/// Sequence `candidates` into a tour.
///
/// Returns `Ok(None)` when fewer than [`MIN_ROUTE_POINTS`] points remain after
/// prepending the live position; callers keep whatever tour they had.
pub fn solve<L>(
    candidates: &[Point],
    live_position: Option<(f64, f64)>,
    lookup: &L,
    options: &SolveOptions,
) -> Result<Option<Tour>, SequenceError>
where
    L: RouteLookup + Sync + ?Sized,
{
    let mut working = Vec::with_capacity(candidates.len() + 1);
    if let Some(location) = live_position {
        working.push(Point::live_position(location));
    }
    working.extend(candidates.iter().cloned());

    if working.len() < MIN_ROUTE_POINTS {
        return Ok(None);
    }

    validate(candidates, &working, live_position.is_some())?;

    let matrix = LegMatrix::build_with(&working, lookup, options.lookup_mode);
    let order = nearest_neighbor_order(&matrix);
    let tour = assemble(&working, &matrix, &order, live_position.is_some());

    info!(
        points = tour.points.len(),
        legs = tour.legs.len(),
        estimated_legs = tour.estimated_legs(),
        distance_km = tour.total_distance_km,
        duration_min = tour.total_duration_min,
        "route sequenced"
    );

    Ok(Some(tour))
}

fn validate(candidates: &[Point], working: &[Point], live: bool) -> Result<(), SequenceError> {
    if live {
        if let Some(point) = candidates.iter().find(|p| p.id == LIVE_POSITION_ID) {
            return Err(SequenceError::ReservedId {
                id: point.id.clone(),
            });
        }
    }

    if let Some(point) = working
        .iter()
        .find(|p| !p.lat.is_finite() || !p.lng.is_finite())
    {
        return Err(SequenceError::NonFiniteCoordinate {
            id: point.id.clone(),
        });
    }

    Ok(())
}

/// Greedy visiting order starting at index 0.
///
/// Unvisited indices stay in ascending order and only a strictly shorter
/// distance replaces the running best, so ties go to the lowest index.
pub fn nearest_neighbor_order(matrix: &LegMatrix) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(n);
    let mut unvisited: Vec<usize> = (1..n).collect();
    let mut current = 0;
    order.push(current);

    while !unvisited.is_empty() {
        let mut nearest_pos = 0;
        let mut nearest_distance = matrix.distance_km(current, unvisited[0]);

        for (pos, &index) in unvisited.iter().enumerate().skip(1) {
            let distance = matrix.distance_km(current, index);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_pos = pos;
            }
        }

        current = unvisited.remove(nearest_pos);
        order.push(current);
    }

    order
}

fn assemble(working: &[Point], matrix: &LegMatrix, order: &[usize], live: bool) -> Tour {
    let mut tour = Tour::default();

    for pair in order.windows(2) {
        let leg = matrix.leg(pair[0], pair[1]);
        tour.total_distance_km += leg.distance_km;
        tour.total_duration_min += leg.duration_min;
        tour.legs.push(leg.clone());
    }

    // The live position is always index 0, so it is always first in `order`.
    let skip = usize::from(live);
    tour.points = order
        .iter()
        .skip(skip)
        .map(|&index| working[index].clone())
        .collect();

    tour
}
