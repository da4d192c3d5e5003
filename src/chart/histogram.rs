//! Log-frequency histogram: one bar per source location.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;

use ratatui::layout::Rect;
use serde::Serialize;

use super::{gutter_width, AxisTick, ChartState, PlotArea, Tooltip};
use crate::config::HistogramSettings;
use crate::data::scale::format_tick;
use crate::data::{BandScale, HistogramRecord, Join, LinearScale, SourceKey};

/// Vertical cells per y-axis tick.
const CELLS_PER_TICK: f64 = 3.0;

/// A bound bar, in absolute cell coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub key: SourceKey,
    pub count: u64,
    pub x: f64,
    pub width: f64,
    /// Top edge of the bar.
    pub y: f64,
    pub height: f64,
}

impl Bar {
    /// Terminal columns covered by this bar, always at least one.
    pub fn columns(&self) -> std::ops::Range<u16> {
        let start = self.x.round() as u16;
        let end = (self.x + self.width).round() as u16;
        start..end.max(start + 1)
    }
}

/// Histogram of how often each source location logged.
#[derive(Debug, Clone)]
pub struct HistogramChart {
    state: ChartState,
    settings: HistogramSettings,
    records: Vec<HistogramRecord>,
    x: BandScale<SourceKey>,
    y: LinearScale,
    plot: PlotArea,
    bars: Vec<Bar>,
    ticks: Vec<AxisTick>,
    last_join: Option<Join>,
    hovered: Option<usize>,
    tooltip: Tooltip,
}

impl Default for HistogramChart {
    fn default() -> Self {
        Self::new(HistogramSettings::default())
    }
}

impl HistogramChart {
    pub fn new(settings: HistogramSettings) -> Self {
        let mut x = BandScale::new();
        x.padding(settings.padding);
        Self {
            state: ChartState::Uninitialized,
            settings,
            records: Vec::new(),
            x,
            y: LinearScale::default(),
            plot: PlotArea::default(),
            bars: Vec::new(),
            ticks: Vec::new(),
            last_join: None,
            hovered: None,
            tooltip: Tooltip::default(),
        }
    }

    /// Bind new records.
    ///
    /// Records sharing a source location collapse into one bar: the latest
    /// count wins and the bar keeps the position of the first occurrence.
    pub fn set_data(&mut self, records: Vec<HistogramRecord>) {
        self.records = latest_by_key(records);
        if self.state.area().is_some() {
            self.redraw();
        }
    }

    /// Lay the chart out into `area`; a no-op when the area is unchanged.
    pub fn layout(&mut self, area: Rect) {
        if !self.state.needs_layout(area) {
            return;
        }
        tracing::debug!(?area, "histogram layout");
        self.state = ChartState::Initialized { area };
        self.redraw();
    }

    /// Recompute domains and rebind bars.
    fn redraw(&mut self) {
        let Some(area) = self.state.area() else {
            return;
        };

        let max = self.records.iter().map(|r| r.number_of_times).max().unwrap_or(0);
        self.y.set_domain(0.0, max as f64);
        self.x.domain(self.records.iter().map(HistogramRecord::key));

        // Labels decide the gutter, and the gutter decides the plot, so take
        // the tick values from a provisional plot first.
        let provisional = PlotArea::inside(area, self.settings.margin, 0);
        let values = self.y.ticks(PlotArea::tick_count(provisional.height(), CELLS_PER_TICK));
        let labels: Vec<String> = values.iter().map(|v| format_tick(*v)).collect();

        self.plot = PlotArea::inside(area, self.settings.margin, gutter_width(&labels));
        self.x.range(self.plot.left, self.plot.right);
        self.y.set_range(self.plot.bottom, self.plot.top);

        self.ticks = values
            .iter()
            .zip(labels)
            .map(|(v, label)| AxisTick {
                position: self.y.scale(*v),
                label,
            })
            .collect();

        let (x, y, bottom) = (&self.x, &self.y, self.plot.bottom);
        let join = Join::apply(
            &mut self.bars,
            &self.records,
            |i, record| place_bar(x, y, bottom, i, record),
            |bar, i, record| *bar = place_bar(x, y, bottom, i, record),
        );
        tracing::debug!(
            exit = join.exit.len(),
            update = join.update.len(),
            enter = join.enter.len(),
            "histogram bars joined"
        );
        self.last_join = Some(join);

        if self.hovered.is_some_and(|i| i >= self.bars.len()) {
            self.hovered = None;
            self.tooltip.clear();
        }
    }

    /// Update hover state for a pointer at (`column`, `row`).
    ///
    /// Returns true when the pointer is over a bar.
    pub fn hover(&mut self, column: u16, row: u16, now: Instant) -> bool {
        match self.bar_at(column, row) {
            Some(index) => {
                let bar = &self.bars[index];
                let lines = vec![
                    format!("File: {}", bar.key.file),
                    format!("Function: {}", bar.key.function),
                    format!("Frequency: {}", bar.count),
                ];
                self.tooltip.show(lines, tooltip_anchor(column, row), now);
                self.hovered = Some(index);
                true
            }
            None => {
                self.leave(now);
                false
            }
        }
    }

    /// The pointer left the chart or the hovered bar.
    pub fn leave(&mut self, now: Instant) {
        self.hovered = None;
        self.tooltip.hide(now);
    }

    /// Index of the bar under (`column`, `row`).
    pub fn bar_at(&self, column: u16, row: u16) -> Option<usize> {
        let bottom_row = (self.plot.bottom.ceil() as u16).saturating_sub(1);
        self.bars.iter().position(|bar| {
            let top_row = (bar.y.floor() as u16).min(bottom_row);
            bar.columns().contains(&column) && row >= top_row && row <= bottom_row
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn records(&self) -> &[HistogramRecord] {
        &self.records
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// y-axis ticks, bottom to top.
    pub fn y_ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    pub fn y_domain(&self) -> (f64, f64) {
        self.y.domain()
    }

    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    pub fn last_join(&self) -> Option<&Join> {
        self.last_join.as_ref()
    }

    pub fn hovered(&self) -> Option<&Bar> {
        self.hovered.and_then(|i| self.bars.get(i))
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

fn place_bar(
    x: &BandScale<SourceKey>,
    y: &LinearScale,
    bottom: f64,
    index: usize,
    record: &HistogramRecord,
) -> Bar {
    let top = y.scale(record.number_of_times as f64);
    Bar {
        key: record.key(),
        count: record.number_of_times,
        x: x.position_at(index),
        width: x.bandwidth(),
        y: top,
        height: (bottom - top).max(0.0),
    }
}

fn latest_by_key(records: Vec<HistogramRecord>) -> Vec<HistogramRecord> {
    let mut slots: HashMap<SourceKey, usize> = HashMap::new();
    let mut out: Vec<HistogramRecord> = Vec::with_capacity(records.len());
    for record in records {
        match slots.entry(record.key()) {
            Entry::Occupied(slot) => out[*slot.get()] = record,
            Entry::Vacant(slot) => {
                slot.insert(out.len());
                out.push(record);
            }
        }
    }
    out
}

/// Offset of the tooltip from the pointer: right and up.
pub(crate) fn tooltip_anchor(column: u16, row: u16) -> (u16, u16) {
    (column.saturating_add(1), row.saturating_sub(1))
}
