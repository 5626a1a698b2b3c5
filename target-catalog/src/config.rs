//! Pipeline configuration.
//!
//! Both pipelines run with fixed defaults. A JSON file can override any subset
//! of the fields; missing fields keep their defaults.

use crate::data::query::{DEFAULT_FILTER, DEFAULT_ORDER_BY, DEFAULT_TABLE, TARGET_COLUMNS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Intermediate catalog written by the fetcher and read by the analyzer
pub const DEFAULT_TARGET_LIST: &str = "ASTR502_Mega_Target_List.csv";

/// Composite statistics figure
pub const DEFAULT_PLOT_FILE: &str = "target_statistics_plot.png";

/// Exoplanet Archive synchronous TAP endpoint
pub const DEFAULT_ENDPOINT: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where and what to query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub endpoint: String,
    pub table: String,
    pub columns: Vec<String>,
    pub filter: String,
    pub order_by: String,
    /// Value of the `format` form field
    pub format: String,
    /// Output CSV
    pub output: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            table: DEFAULT_TABLE.to_string(),
            columns: TARGET_COLUMNS.iter().map(|c| c.to_string()).collect(),
            filter: DEFAULT_FILTER.to_string(),
            order_by: DEFAULT_ORDER_BY.to_string(),
            format: "csv".to_string(),
            output: PathBuf::from(DEFAULT_TARGET_LIST),
        }
    }
}

/// Thresholds and file names for the age statistics report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub plot: PathBuf,
    pub bins: usize,
    /// Upper bound for the "young" bucket, Gyr
    pub young_age_gyr: f64,
    /// Upper bound for the "very young" bucket, Gyr
    pub very_young_age_gyr: f64,
    /// Uncertainty cut applied to the uncertainty histogram only, Gyr
    pub max_plotted_age_err_gyr: f64,
    /// Marker on the brightness histogram, mag
    pub brightness_limit_mag: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_TARGET_LIST),
            plot: PathBuf::from(DEFAULT_PLOT_FILE),
            bins: 30,
            young_age_gyr: 1.0,
            very_young_age_gyr: 0.1,
            max_plotted_age_err_gyr: 5.0,
            brightness_limit_mag: 12.5,
        }
    }
}

/// Load a JSON config file, falling back to defaults for absent fields
pub fn load_config<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `path` if given, otherwise return the defaults
pub fn load_or_default<T>(path: Option<&Path>) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match path {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            load_config(path)
        }
        None => Ok(T::default()),
    }
}
