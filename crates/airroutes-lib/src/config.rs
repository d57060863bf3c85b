//! Application configuration.
//!
//! Configuration is a JSON document; every section and field is optional and
//! falls back to [`AppConfig::default`].
//!
//! ```json
//! {
//!   "flight": { "cruise_speed_kmh": 850.0, "overhead_factor": 1.6 },
//!   "chart": { "top_n": 15 },
//!   "map": { "zoom": 4 }
//! }
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::FlightProfile;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV: &str = "AIRROUTES_CONFIG";

/// Per-country chart settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Number of countries kept per chart.
    pub top_n: usize,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            width: 1400,
            height: 600,
        }
    }
}

/// Map viewport settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub width: u32,
    pub height: u32,
    pub zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 600,
            zoom: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub flight: FlightProfile,
    pub chart: ChartSettings,
    pub map: MapSettings,
}

impl AppConfig {
    /// Parse and validate a configuration document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.flight.validate()?;
        if self.chart.top_n == 0 {
            return Err(Error::InvalidConfig {
                message: "chart.top_n must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Load configuration.
///
/// An explicit `path` must exist. Otherwise `AIRROUTES_CONFIG` is consulted;
/// when neither is set the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let resolved = match path {
        Some(explicit) => Some(explicit.to_path_buf()),
        None => env::var_os(CONFIG_ENV).map(Into::into),
    };

    let Some(resolved) = resolved else {
        debug!("no configuration file given; using defaults");
        return Ok(AppConfig::default());
    };

    let contents = fs::read_to_string(&resolved)?;
    let config = AppConfig::from_json(&contents)?;
    debug!(path = %resolved.display(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_json("{}").expect("valid config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.flight.cruise_speed_kmh, 850.0);
        assert_eq!(config.chart.top_n, 10);
        assert_eq!(config.map.zoom, 3);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::from_json(r#"{"flight": {"overhead_factor": 1.6}}"#)
            .expect("valid config");
        assert_eq!(config.flight.overhead_factor, 1.6);
        assert_eq!(config.flight.cruise_speed_kmh, 850.0);
    }

    #[test]
    fn rejects_non_positive_overhead() {
        let error = AppConfig::from_json(r#"{"flight": {"overhead_factor": 0}}"#)
            .expect_err("invalid overhead");
        assert!(matches!(error, Error::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_zero_top_n() {
        let error =
            AppConfig::from_json(r#"{"chart": {"top_n": 0}}"#).expect_err("invalid top_n");
        assert!(error.to_string().contains("top_n"));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"chart": {{"top_n": 3}}}}"#).expect("write config");

        let config = load_config(Some(file.path())).expect("config loads");
        assert_eq!(config.chart.top_n, 3);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let error = load_config(Some(Path::new("/nonexistent/airroutes.json")))
            .expect_err("missing file");
        assert!(matches!(error, Error::Io(_)));
    }
}
