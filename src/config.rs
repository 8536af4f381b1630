use std::path::PathBuf;

use crate::data::filter::DateBounds;
use crate::error::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "./mel_estate.csv";
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/dark-v10";

// ---------------------------------------------------------------------------
// Map-tile settings
// ---------------------------------------------------------------------------

/// Base-map settings for the geography chart. The credential is never
/// compiled in; it comes from the environment or a `.env` file.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub access_token: Option<String>,
    pub style: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            style: DEFAULT_MAP_STYLE.to_string(),
            // Melbourne CBD
            center_lat: -37.8,
            center_lon: 144.96,
            zoom: 8.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub map: MapConfig,
    pub date_bounds: DateBounds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            map: MapConfig::default(),
            date_bounds: DateBounds::default(),
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the process environment, after loading a
    /// `.env` file from the working directory if there is one.
    ///
    /// | variable              | meaning                                   |
    /// |-----------------------|-------------------------------------------|
    /// | `ESTATE_DATA_PATH`    | dataset CSV (default `./mel_estate.csv`)  |
    /// | `MAPBOX_ACCESS_TOKEN` | map-tile credential                       |
    /// | `MAPBOX_STYLE`        | base-map style URL                        |
    /// | `ESTATE_DATE_BOUNDS`  | `half-open` (default) or `exclusive`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an explicit variable
    /// lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("ESTATE_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }
        config.map.access_token = get("MAPBOX_ACCESS_TOKEN");
        if let Some(style) = get("MAPBOX_STYLE") {
            config.map.style = style;
        }
        if let Some(bounds) = get("ESTATE_DATE_BOUNDS") {
            config.date_bounds = match bounds.trim() {
                "half-open" => DateBounds::HalfOpen,
                "exclusive" => DateBounds::Exclusive,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "ESTATE_DATE_BOUNDS",
                        value: bounds.clone(),
                        expected: "half-open, exclusive",
                    })
                }
            };
        }

        Ok(config)
    }
}
