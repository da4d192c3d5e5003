//! Non-interactive export of chart geometry to JSON.
//!
//! Lays both charts out at a fixed size and writes what would be drawn:
//! bars, axis ticks, the line path and the scale domains.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ratatui::layout::Rect;
use serde::Serialize;

use crate::chart::{AxisTick, Bar, HistogramChart, LineChart};
use crate::config::Settings;
use crate::data::{ChartSnapshot, TimeRange};

#[derive(Debug, Serialize)]
pub struct ChartExport {
    pub width: u16,
    pub height: u16,
    pub histogram: HistogramExport,
    pub usage: UsageExport,
}

#[derive(Debug, Serialize)]
pub struct HistogramExport {
    pub empty: bool,
    pub y_domain: [f64; 2],
    pub y_ticks: Vec<TickExport>,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Serialize)]
pub struct UsageExport {
    pub empty: bool,
    pub data_name: String,
    pub time_range: TimeRange,
    pub y_domain: [f64; 2],
    pub y_ticks: Vec<TickExport>,
    pub x_ticks: Vec<TickExport>,
    pub path: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct TickExport {
    pub position: f64,
    pub label: String,
}

impl From<&AxisTick> for TickExport {
    fn from(tick: &AxisTick) -> Self {
        Self {
            position: tick.position,
            label: tick.label.clone(),
        }
    }
}

/// Lay out both charts for `snapshot` in a `width` x `height` area.
pub fn build_export(
    snapshot: &ChartSnapshot,
    settings: &Settings,
    width: u16,
    height: u16,
) -> ChartExport {
    let area = Rect::new(0, 0, width, height);

    let mut histogram = HistogramChart::new(settings.histogram);
    histogram.set_data(snapshot.histogram.clone());
    histogram.layout(area);

    let mut line = LineChart::new(settings.line, settings.tooltip);
    line.set_usage(snapshot.usage.clone().unwrap_or_default());
    line.layout(area);

    let (h0, h1) = histogram.y_domain();
    let (l0, l1) = line.y_domain();
    ChartExport {
        width,
        height,
        histogram: HistogramExport {
            empty: histogram.is_empty(),
            y_domain: [h0, h1],
            y_ticks: histogram.y_ticks().iter().map(TickExport::from).collect(),
            bars: histogram.bars().to_vec(),
        },
        usage: UsageExport {
            empty: line.is_empty(),
            data_name: line.data_name().to_string(),
            time_range: line.time_range(),
            y_domain: [l0, l1],
            y_ticks: line.y_ticks().iter().map(TickExport::from).collect(),
            x_ticks: line.x_ticks().iter().map(TickExport::from).collect(),
            path: line.path().iter().map(|&(x, y)| [x, y]).collect(),
        },
    }
}

/// Build the export and write it as pretty JSON to `path`.
pub fn write_export(
    snapshot: &ChartSnapshot,
    settings: &Settings,
    width: u16,
    height: u16,
    path: &Path,
) -> Result<()> {
    let export = build_export(snapshot, settings, width, height);
    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    tracing::info!(path = %path.display(), bars = export.histogram.bars.len(), "exported charts");
    Ok(())
}

/// Parse a size such as "120x40".
pub fn parse_size(s: &str) -> Result<(u16, u16)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected WIDTHxHEIGHT, got {}", s))?;
    let width: u16 = w.trim().parse().context("Invalid width")?;
    let height: u16 = h.trim().parse().context("Invalid height")?;
    anyhow::ensure!(width > 0 && height > 0, "Size must be non-zero: {}", s);
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataPoint, HistogramRecord, UsageSeries};

    fn snapshot() -> ChartSnapshot {
        ChartSnapshot {
            histogram: vec![
                HistogramRecord::new("a.ts", "f", 5),
                HistogramRecord::new("b.ts", "g", 2),
            ],
            usage: Some(UsageSeries {
                data_name: "responses".to_string(),
                time_range: TimeRange::new(0, 1000),
                points: vec![DataPoint::new(0, 1.0), DataPoint::new(1000, 3.0)],
            }),
        }
    }

    #[test]
    fn test_build_export() {
        let export = build_export(&snapshot(), &Settings::default(), 120, 40);
        assert_eq!(export.histogram.bars.len(), 2);
        assert_eq!(export.histogram.y_domain, [0.0, 5.0]);
        assert_eq!(export.usage.path.len(), 2);
        assert_eq!(export.usage.y_domain, [4.0, 0.0]);
        assert!(!export.usage.empty);
    }

    #[test]
    fn test_build_export_empty_snapshot() {
        let export = build_export(&ChartSnapshot::default(), &Settings::default(), 80, 24);
        assert!(export.histogram.empty);
        assert!(export.usage.empty);
        assert_eq!(export.histogram.y_domain, [0.0, 0.0]);
        assert_eq!(export.usage.y_domain, [1.0, -1.0]);
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        write_export(&snapshot(), &Settings::default(), 100, 30, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["histogram"]["bars"][0]["key"]["file"], "a.ts");
        assert_eq!(value["usage"]["data_name"], "responses");
        assert_eq!(value["usage"]["time_range"]["endTime"], 1000);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("120x40").unwrap(), (120, 40));
        assert_eq!(parse_size("80X24").unwrap(), (80, 24));
        assert!(parse_size("80").is_err());
        assert!(parse_size("0x10").is_err());
    }
}
