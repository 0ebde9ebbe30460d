//! Live position requests.

use std::time::Duration;

use thiserror::Error;

use crate::traits::PositionSource;

/// Classified failure of a position request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable")]
    Unavailable,
    #[error("timed out waiting for location")]
    Timeout,
    #[error("unknown error while getting location: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the caller will accept.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

/// Always answers with the same coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub (f64, f64));

impl PositionSource for FixedPosition {
    fn current_position(&self, _options: &PositionOptions) -> Result<(f64, f64), PositionError> {
        let (lat, lng) = self.0;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(PositionError::Unavailable);
        }
        Ok(self.0)
    }
}

/// A device without geolocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl PositionSource for NoGeolocation {
    fn current_position(&self, _options: &PositionOptions) -> Result<(f64, f64), PositionError> {
        Err(PositionError::Unsupported)
    }
}
