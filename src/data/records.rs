//! Chart input records.
//!
//! These types match the JSON payloads produced by the monitoring pages:
//! a log-frequency histogram keyed by source location, and a usage series
//! of timestamped samples over an explicit time range.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a log line was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub function: String,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
        }
    }

    /// Structured identity of this location.
    pub fn key(&self) -> SourceKey {
        SourceKey {
            file: self.file.clone(),
            function: self.function.clone(),
        }
    }
}

/// Identity of a histogram bar.
///
/// Kept as a pair so that `("ab", "c")` and `("a", "bc")` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceKey {
    pub file: String,
    pub function: String,
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.function)
    }
}

/// How often logs were emitted from one source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramRecord {
    pub source_location: SourceLocation,
    pub number_of_times: u64,
}

impl HistogramRecord {
    pub fn new(file: &str, function: &str, number_of_times: u64) -> Self {
        Self {
            source_location: SourceLocation::new(file, function),
            number_of_times,
        }
    }

    pub fn key(&self) -> SourceKey {
        self.source_location.key()
    }
}

/// A single usage sample. `date` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: i64,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: i64, value: f64) -> Self {
        Self { date, value }
    }
}

/// The x-axis window of a usage chart, independent of the sample bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: i64,
    pub end_time: i64,
}

impl TimeRange {
    pub fn new(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Length of the window in milliseconds (zero if inverted).
    pub fn span(&self) -> i64 {
        self.end_time.saturating_sub(self.start_time).max(0)
    }

    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start_time && ts <= self.end_time
    }
}

/// A named usage statistic over a time window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSeries {
    /// Label used in tooltip text, e.g. "responses".
    #[serde(default)]
    pub data_name: String,
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default, alias = "data")]
    pub points: Vec<DataPoint>,
}

/// Everything a data source delivers in one update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSnapshot {
    #[serde(default)]
    pub histogram: Vec<HistogramRecord>,
    #[serde(default)]
    pub usage: Option<UsageSeries>,
}

impl ChartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty() && self.usage.as_ref().map_or(true, |u| u.points.is_empty())
    }
}
