//! Run configuration
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. the YAML config file (optional)
//! 3. environment variables (a `.env` file is loaded first by the CLI)
//! 4. command line flags
//!
//! Components never read the environment themselves; the CLI resolves an
//! [`AppConfig`] once and hands typed values down.

use crate::downloader::config::DEFAULT_COOLDOWN_SECS;
use crate::fetcher::MarineTrafficConfig;
use crate::identifier::{ApiKey, IdentifierError, Mmsi};
use crate::output::StagingLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "MARINETRAFFIC_API_KEY";
/// Environment variable holding the vessel MMSI
pub const ENV_MMSI: &str = "VESSEL_MMSI";
/// Environment variable holding the first day to fetch
pub const ENV_START_DATE: &str = "TRACK_START_DATE";
/// Environment variable holding the last day to fetch
pub const ENV_END_DATE: &str = "TRACK_END_DATE";
/// Environment variable overriding the staging root
pub const ENV_TEMP_DIR: &str = "TRACK_TEMP_DIR";
/// Environment variable overriding the results root
pub const ENV_RESULTS_DIR: &str = "TRACK_RESULTS_DIR";

const DEFAULT_TEMP_DIR: &str = "./temp";
const DEFAULT_RESULTS_DIR: &str = "./results";

/// API section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// API key; prefer the environment over committing it to the file
    pub key: Option<String>,
    /// Endpoint settings
    #[serde(flatten)]
    pub endpoint: MarineTrafficConfig,
}

/// Vessel and date range section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VesselSection {
    /// Nine-digit MMSI
    pub mmsi: Option<String>,
    /// First day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Directory section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Root for staging directories
    pub temp_dir: PathBuf,
    /// Root for combined results
    pub results_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from(DEFAULT_TEMP_DIR),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

/// Fetch loop section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchSection {
    /// Pause between chunk requests, in seconds
    pub cooldown_secs: u64,
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

/// Complete configuration, as read from YAML and overridden by env and flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API settings
    pub api: ApiSection,
    /// Vessel and range
    pub vessel: VesselSection,
    /// Directories
    pub paths: PathsSection,
    /// Fetch loop
    pub fetch: FetchSection,
}

impl AppConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a YAML file
    ///
    /// A missing file yields the defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        if !path.exists() {
            if required {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        debug!("Loaded config file {}", path.display());
        Self::from_yaml(&content)
    }

    /// Apply overrides from an environment lookup
    ///
    /// Takes the lookup as a function so tests need not touch the process
    /// environment; the CLI passes `|k| std::env::var(k).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api.key = Some(key);
        }
        if let Some(mmsi) = non_empty(ENV_MMSI) {
            self.vessel.mmsi = Some(mmsi);
        }
        if let Some(start) = non_empty(ENV_START_DATE) {
            self.vessel.start_date = Some(start);
        }
        if let Some(end) = non_empty(ENV_END_DATE) {
            self.vessel.end_date = Some(end);
        }
        if let Some(dir) = non_empty(ENV_TEMP_DIR) {
            self.paths.temp_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty(ENV_RESULTS_DIR) {
            self.paths.results_dir = PathBuf::from(dir);
        }
    }

    /// Validated API key
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        let raw = self
            .api
            .key
            .as_deref()
            .ok_or(ConfigError::Missing { field: "api.key", env: ENV_API_KEY })?;
        Ok(ApiKey::new(raw)?)
    }

    /// Validated MMSI
    pub fn mmsi(&self) -> Result<Mmsi, ConfigError> {
        let raw = self
            .vessel
            .mmsi
            .as_deref()
            .ok_or(ConfigError::Missing { field: "vessel.mmsi", env: ENV_MMSI })?;
        Ok(Mmsi::parse(raw)?)
    }

    /// Raw `(start, end)` date strings; validation happens in [`crate::range`]
    pub fn date_bounds(&self) -> Result<(&str, &str), ConfigError> {
        let start = self.vessel.start_date.as_deref().ok_or(ConfigError::Missing {
            field: "vessel.start_date",
            env: ENV_START_DATE,
        })?;
        let end = self.vessel.end_date.as_deref().ok_or(ConfigError::Missing {
            field: "vessel.end_date",
            env: ENV_END_DATE,
        })?;
        Ok((start, end))
    }

    /// Staging and results roots
    pub fn layout(&self) -> StagingLayout {
        StagingLayout::new(&self.paths.temp_dir, &self.paths.results_dir)
    }

    /// Pause between chunk requests
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.fetch.cooldown_secs)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(String),

    /// Config file is not valid YAML for [`AppConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(String),

    /// A required value was set nowhere
    #[error("missing {field}: set it in the config file or via {env}")]
    Missing {
        /// Config file key
        field: &'static str,
        /// Environment variable
        env: &'static str,
    },

    /// A value was present but malformed
    #[error(transparent)]
    Invalid(#[from] IdentifierError),
}
