//! Planner configuration: JSON file, then environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::matrix::LookupMode;
use crate::osrm::OsrmConfig;
use crate::session::Credentials;

pub const ENV_OSRM_URL: &str = "ROUTE_SEQUENCER_OSRM_URL";
pub const ENV_OSRM_PROFILE: &str = "ROUTE_SEQUENCER_OSRM_PROFILE";
pub const ENV_OSRM_TIMEOUT_SECS: &str = "ROUTE_SEQUENCER_OSRM_TIMEOUT_SECS";
pub const ENV_LOOKUP_MODE: &str = "ROUTE_SEQUENCER_LOOKUP_MODE";
pub const ENV_SESSION_DIR: &str = "ROUTE_SEQUENCER_SESSION_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub osrm: OsrmConfig,
    pub lookup_mode: LookupMode,
    pub session_dir: PathBuf,
    pub credentials: Credentials,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            osrm: OsrmConfig::default(),
            lookup_mode: LookupMode::Sequential,
            session_dir: PathBuf::from(".route-sequencer"),
            credentials: Credentials::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but can't be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.osrm.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "osrm.timeout_secs",
                reason: "timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    /// Defaults with process environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from any variable lookup (the process environment in
    /// production, a map in tests).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_OSRM_URL) {
            self.osrm.base_url = url;
        }
        if let Some(profile) = lookup(ENV_OSRM_PROFILE) {
            self.osrm.profile = profile;
        }
        if let Some(raw) = lookup(ENV_OSRM_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_OSRM_TIMEOUT_SECS,
                reason: format!("expected whole seconds, got {raw:?}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Env {
                    var: ENV_OSRM_TIMEOUT_SECS,
                    reason: "timeout must be at least one second".to_string(),
                });
            }
            self.osrm.timeout_secs = secs;
        }
        if let Some(raw) = lookup(ENV_LOOKUP_MODE) {
            self.lookup_mode = raw.parse().map_err(|reason| ConfigError::Env {
                var: ENV_LOOKUP_MODE,
                reason,
            })?;
        }
        if let Some(dir) = lookup(ENV_SESSION_DIR) {
            self.session_dir = PathBuf::from(dir);
        }
        self.validate()?;
        Ok(self)
    }
}
