use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Project constants
// ---------------------------------------------------------------------------

pub const APP_NAME: &str = "TechComView SA";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DATA_SOURCE_NOTE: &str = "OpenCelliD";
pub const SUPPORTED_REGIONS: [&str; 4] =
    ["South America", "Central America", "Caribbean", "North America"];

/// Optional settings file read from the working directory.
pub const CONFIG_FILE: &str = "techcomview.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// User-tunable settings. Every field has a default, so a partial (or absent)
/// settings file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Data files tried in order before falling back to the built-in table.
    pub data_paths: Vec<PathBuf>,
    /// Bars in the "top countries" chart.
    pub top_n_chart: usize,
    /// Countries selected by the "Top N" quick filter.
    pub top_n_quick: usize,
    pub map: MapConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Initial visible width in degrees of longitude.
    pub span_degrees: f64,
    /// Marker radius (points) of the largest value on the map.
    pub max_marker_radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_paths: vec![
                PathBuf::from("data/expanded_telecom_data.csv"),
                PathBuf::from("data/south_america_cells.csv"),
            ],
            top_n_chart: 5,
            top_n_quick: 3,
            map: MapConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: -15.0,
            center_lon: -60.0,
            span_degrees: 70.0,
            max_marker_radius: 30.0,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
        }
    }
}

impl DashboardConfig {
    /// Read settings from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Settings from `path` when it exists, defaults otherwise. A malformed
    /// file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "top_n_chart": 8, "map": { "center_lat": 10.0 } }"#).unwrap();
        assert_eq!(config.top_n_chart, 8);
        assert_eq!(config.top_n_quick, 3);
        assert_eq!(config.map.center_lat, 10.0);
        assert_eq!(config.map.center_lon, -60.0);
        assert_eq!(config.data_paths.len(), 2);
    }

    #[test]
    fn absent_file_gives_defaults() {
        let config = DashboardConfig::load_or_default(Path::new("no/such/techcomview.json"));
        assert_eq!(config, DashboardConfig::default());
    }
}
