//! Run configuration.
//!
//! Every field has a default, so a run with no config file and no flags
//! fetches from the public endpoints and writes into the working directory.
//! A JSON file may override any subset:
//! ```json
//! {
//!   "endpoints": { "times_base_url": "http://localhost:8080" },
//!   "output_dir": "dist",
//!   "stats_csv": "runs.csv"
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CATALOG_URL: &str = "https://data.hkbus.app/routeFareList.min.json";
pub const DEFAULT_TIMES_BASE_URL: &str = "https://timeinterval.hkbuseta.com";

pub const PRETTY_OUTPUT_FILE: &str = "routeTimeList.json";
pub const MINIFIED_OUTPUT_FILE: &str = "routeTimeList.min.json";

/// Where the catalog and the journey-time tables are fetched from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub catalog_url: String,
    /// Prefix for `times/all.json` and `times_hourly/{weekday}/{HH}/all.json`.
    pub times_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            times_base_url: DEFAULT_TIMES_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub endpoints: Endpoints,
    /// Directory receiving the two output documents.
    pub output_dir: PathBuf,
    /// Optional CSV file that gets one summary row appended per run.
    pub stats_csv: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            output_dir: PathBuf::from("."),
            stats_csv: None,
        }
    }
}

impl RunConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn pretty_output_path(&self) -> PathBuf {
        self.output_dir.join(PRETTY_OUTPUT_FILE)
    }

    pub fn minified_output_path(&self) -> PathBuf {
        self.output_dir.join(MINIFIED_OUTPUT_FILE)
    }
}
