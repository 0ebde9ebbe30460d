//! Pairwise leg matrix.
//!
//! Every off-diagonal cell is resolved independently: one lookup per ordered
//! pair, falling back to the haversine estimate on any lookup failure.

use std::str::FromStr;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::debug;

use crate::point::Point;
use crate::tour::Leg;
use crate::traits::RouteLookup;

/// How matrix lookups are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// One lookup at a time, row-major.
    #[default]
    Sequential,
    /// Rows resolved concurrently on the rayon pool.
    Parallel,
}

impl FromStr for LookupMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            other => Err(format!("unknown lookup mode: {other}")),
        }
    }
}

/// N x N legs, indexed by the order of the points they were built from.
#[derive(Debug, Clone)]
pub struct LegMatrix {
    legs: Vec<Vec<Leg>>,
}

impl LegMatrix {
    /// Build with one lookup at a time.
    pub fn build<L>(points: &[Point], lookup: &L) -> Self
    where
        L: RouteLookup + ?Sized,
    {
        let legs = points
            .iter()
            .enumerate()
            .map(|(i, from)| row(i, from, points, lookup))
            .collect();
        Self { legs }
    }

    /// Build with rows spread across the rayon pool.
    pub fn build_parallel<L>(points: &[Point], lookup: &L) -> Self
    where
        L: RouteLookup + Sync + ?Sized,
    {
        let legs = points
            .par_iter()
            .enumerate()
            .map(|(i, from)| row(i, from, points, lookup))
            .collect();
        Self { legs }
    }

    pub fn build_with<L>(points: &[Point], lookup: &L, mode: LookupMode) -> Self
    where
        L: RouteLookup + Sync + ?Sized,
    {
        match mode {
            LookupMode::Sequential => Self::build(points, lookup),
            LookupMode::Parallel => Self::build_parallel(points, lookup),
        }
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn leg(&self, from: usize, to: usize) -> &Leg {
        &self.legs[from][to]
    }

    pub fn distance_km(&self, from: usize, to: usize) -> f64 {
        self.legs[from][to].distance_km
    }

    pub fn rows(&self) -> &[Vec<Leg>] {
        &self.legs
    }
}

fn row<L>(i: usize, from: &Point, points: &[Point], lookup: &L) -> Vec<Leg>
where
    L: RouteLookup + ?Sized,
{
    points
        .iter()
        .enumerate()
        .map(|(j, to)| {
            if i == j {
                Leg::stationary(from)
            } else {
                resolve_leg(from, to, lookup)
            }
        })
        .collect()
}

/// One directed leg, from the lookup or the haversine fallback.
///
/// A lookup answer with non-finite or negative numbers counts as a failure.
pub fn resolve_leg<L>(from: &Point, to: &Point, lookup: &L) -> Leg
where
    L: RouteLookup + ?Sized,
{
    let answer = lookup
        .route(from.location(), to.location())
        .and_then(|road| road.validate().map(|()| road));
    match answer {
        Ok(road) => Leg::from_road(from, to, road),
        Err(err) => {
            debug!(
                from = %from.id,
                to = %to.id,
                error = %err,
                "route lookup failed, using haversine estimate"
            );
            Leg::estimated(from, to)
        }
    }
}
