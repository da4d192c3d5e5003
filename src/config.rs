//! Layered settings: defaults, an optional TOML file, then `STATSCOPE_*`
//! environment variables (`STATSCOPE_HISTOGRAM__PADDING=0.1` for nested
//! keys). Command-line flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::data::duration::parse_duration;

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How often the data source is polled.
    #[serde(deserialize_with = "duration_str")]
    pub refresh: Duration,
    /// "auto", "dark" or "light".
    pub theme: String,
    pub histogram: HistogramSettings,
    pub line: LineSettings,
    pub tooltip: TooltipSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh: Duration::from_secs(1),
            theme: "auto".to_string(),
            histogram: HistogramSettings::default(),
            line: LineSettings::default(),
            tooltip: TooltipSettings::default(),
        }
    }
}

/// Geometry of the log histogram.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HistogramSettings {
    /// Empty cells around the plot.
    pub margin: u16,
    /// Band padding as a fraction of a step.
    pub padding: f64,
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            margin: 1,
            padding: 0.2,
        }
    }
}

/// Geometry of the usage line chart.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LineSettings {
    pub margin: u16,
    /// Hover radius of a point marker, in cells.
    pub marker_radius: f64,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            margin: 2,
            marker_radius: 1.0,
        }
    }
}

/// Tooltip transitions for the usage chart.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    #[serde(deserialize_with = "duration_str")]
    pub fade_in: Duration,
    #[serde(deserialize_with = "duration_str")]
    pub fade_out: Duration,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            fade_in: Duration::from_millis(200),
            fade_out: Duration::from_millis(500),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("STATSCOPE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;
        config.try_deserialize().context("Invalid configuration")
    }
}

fn duration_str<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}
