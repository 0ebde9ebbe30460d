//! Planning session: the point set, the selected sector, the live position
//! and the last published tour.
//!
//! Calculations move the planner `Idle -> Computing -> Idle`. The work itself
//! runs on a [`RouteJob`] that owns a snapshot of its inputs, so it can be
//! handed to another thread while the planner keeps serving reads.

use tracing::{debug, warn};

use crate::error::{PlannerError, SequenceError};
use crate::geolocation::{PositionError, PositionOptions};
use crate::point::Point;
use crate::render::MapFrame;
use crate::sector::{Sector, apply_sector};
use crate::solver::{SolveOptions, solve};
use crate::tour::Tour;
use crate::traits::{MapRenderer, PositionSource, RouteLookup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlannerState {
    #[default]
    Idle,
    Computing,
}

/// Inputs for one route calculation.
#[derive(Debug, Clone)]
pub struct RouteJob {
    candidates: Vec<Point>,
    live_position: Option<(f64, f64)>,
}

impl RouteJob {
    pub fn candidates(&self) -> &[Point] {
        &self.candidates
    }

    pub fn live_position(&self) -> Option<(f64, f64)> {
        self.live_position
    }

    pub fn run<L>(&self, lookup: &L, options: &SolveOptions) -> Result<Option<Tour>, SequenceError>
    where
        L: RouteLookup + Sync + ?Sized,
    {
        solve(&self.candidates, self.live_position, lookup, options)
    }
}

#[derive(Debug, Default)]
pub struct RoutePlanner {
    points: Vec<Point>,
    sector: Option<Sector>,
    live_position: Option<(f64, f64)>,
    location_error: Option<PositionError>,
    tour: Option<Tour>,
    state: PlannerState,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole point set. The previous tour no longer applies.
    pub fn load_points(&mut self, points: Vec<Point>) {
        debug!(count = points.len(), "loading points");
        self.points = points;
        self.tour = None;
    }

    pub fn select_sector(&mut self, sector: Sector) {
        apply_sector(&mut self.points, &sector);
        self.sector = Some(sector);
    }

    /// Flip `visited` on one point. Returns `false` if no point has `id`.
    pub fn toggle_visited(&mut self, id: &str) -> bool {
        match self.points.iter_mut().find(|p| p.id == id) {
            Some(point) => {
                point.visited = !point.visited;
                true
            }
            None => false,
        }
    }

    pub fn set_live_position(&mut self, location: Option<(f64, f64)>) {
        self.live_position = location;
    }

    /// Ask `source` for the live position. A failure is recorded and the
    /// previous live position, if any, is kept.
    pub fn locate<P>(
        &mut self,
        source: &P,
        options: &PositionOptions,
    ) -> Result<(f64, f64), PositionError>
    where
        P: PositionSource + ?Sized,
    {
        match source.current_position(options) {
            Ok(location) => {
                self.live_position = Some(location);
                self.location_error = None;
                Ok(location)
            }
            Err(err) => {
                warn!(error = %err, "could not get live position");
                self.location_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Points in the sector not yet visited, in input order.
    pub fn candidates(&self) -> Vec<Point> {
        self.points.iter().filter(|p| p.is_candidate()).cloned().collect()
    }

    pub fn begin_calculation(&mut self) -> Result<RouteJob, PlannerError> {
        if self.state == PlannerState::Computing {
            return Err(PlannerError::Busy);
        }
        self.state = PlannerState::Computing;
        Ok(RouteJob {
            candidates: self.candidates(),
            live_position: self.live_position,
        })
    }

    /// Publish the outcome of a job started with [`Self::begin_calculation`].
    ///
    /// `Ok(None)` keeps the previous tour. An error publishes nothing.
    pub fn finish_calculation(
        &mut self,
        outcome: Result<Option<Tour>, SequenceError>,
    ) -> Result<Option<&Tour>, PlannerError> {
        if self.state != PlannerState::Computing {
            return Err(PlannerError::NotComputing);
        }
        self.state = PlannerState::Idle;

        match outcome? {
            Some(tour) => {
                self.tour = Some(tour);
            }
            None => debug!("not enough points to route, keeping previous tour"),
        }
        Ok(self.tour.as_ref())
    }

    pub fn calculate_route<L>(
        &mut self,
        lookup: &L,
        options: &SolveOptions,
    ) -> Result<Option<&Tour>, PlannerError>
    where
        L: RouteLookup + Sync + ?Sized,
    {
        let job = self.begin_calculation()?;
        let outcome = job.run(lookup, options);
        self.finish_calculation(outcome)
    }

    /// Drop everything. A job still in flight will not be published.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn frame(&self) -> MapFrame {
        MapFrame::build(&self.points, self.tour.as_ref(), self.sector, self.live_position)
    }

    pub fn render<R>(&self, renderer: &mut R)
    where
        R: MapRenderer + ?Sized,
    {
        renderer.render(&self.frame());
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    pub fn live_position(&self) -> Option<(f64, f64)> {
        self.live_position
    }

    pub fn location_error(&self) -> Option<&PositionError> {
        self.location_error.as_ref()
    }

    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }
}
