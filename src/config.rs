use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{ColorScale, HslColor, DEFAULT_HIGH, DEFAULT_LOW};
use crate::data::model::View;

/// Published cumulative confirmed-case table (one row per province/country).
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "covid-stripes.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL used by "Load from URL" and `--url` without a value.
    pub source_url: String,
    /// Colour for the smallest value of a bar.
    pub low_color: HslColor,
    /// Colour for the largest value of a bar.
    pub high_color: HslColor,
    /// View shown after a load.
    pub default_view: View,
    /// Height of one bar in points.
    pub bar_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            low_color: DEFAULT_LOW,
            high_color: DEFAULT_HIGH,
            default_view: View::Total,
            bar_height: 18.0,
        }
    }
}

impl Config {
    pub fn color_scale(&self) -> ColorScale {
        ColorScale::new(self.low_color, self.high_color)
    }
}

/// Read and parse a config file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Load config, returning defaults if the file doesn't exist or is invalid.
pub fn load_config(path: Option<&Path>) -> Config {
    let path: PathBuf = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Config::default();
    }
    match load_config_from(&path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("ignoring config: {e:#}");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(
            &path,
            r#"{ "default_view": "growth", "low_color": { "hue": 0.0, "saturation": 0.0, "lightness": 0.1 } }"#,
        )
        .unwrap();

        let config = load_config(Some(path.as_path()));
        assert_eq!(config.default_view, View::Growth);
        assert_eq!(config.low_color, HslColor::new(0.0, 0.0, 0.1));
        assert_eq!(config.high_color, DEFAULT_HIGH);
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn missing_or_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.json");
        assert_eq!(load_config(Some(absent.as_path())), Config::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(load_config_from(&bad).is_err());
        assert_eq!(load_config(Some(bad.as_path())), Config::default());
    }
}
