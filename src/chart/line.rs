//! Usage-statistics line chart: a path through timestamped samples with a
//! hoverable marker per sample.

use std::time::Instant;

use ratatui::layout::Rect;
use serde::Serialize;

use super::histogram::tooltip_anchor;
use super::{gutter_width, AxisTick, ChartState, PlotArea, Tooltip};
use crate::config::{LineSettings, TooltipSettings};
use crate::data::scale::{format_tick, format_timestamp, TIME_TICK_FORMAT};
use crate::data::{DataPoint, Join, LinearScale, TimeRange, TimeScale, UsageSeries};

/// Vertical cells per y-axis tick.
const CELLS_PER_Y_TICK: f64 = 3.0;
/// Horizontal cells per x-axis tick; time labels are wide.
const CELLS_PER_X_TICK: f64 = 16.0;
/// Timestamp format in tooltips.
const TOOLTIP_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S";

/// A point marker, in absolute cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Line chart of a usage statistic over a fixed time window.
#[derive(Debug, Clone)]
pub struct LineChart {
    state: ChartState,
    settings: LineSettings,
    points: Vec<DataPoint>,
    time_range: TimeRange,
    data_name: String,
    x: TimeScale,
    y: LinearScale,
    plot: PlotArea,
    path: Vec<(f64, f64)>,
    markers: Vec<Marker>,
    x_ticks: Vec<AxisTick>,
    y_ticks: Vec<AxisTick>,
    hovered: Option<usize>,
    tooltip: Tooltip,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new(LineSettings::default(), TooltipSettings::default())
    }
}

impl LineChart {
    pub fn new(settings: LineSettings, tooltip: TooltipSettings) -> Self {
        Self {
            state: ChartState::Uninitialized,
            settings,
            points: Vec::new(),
            time_range: TimeRange::default(),
            data_name: String::new(),
            x: TimeScale::default(),
            y: LinearScale::default(),
            plot: PlotArea::default(),
            path: Vec::new(),
            markers: Vec::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            hovered: None,
            tooltip: Tooltip::new(tooltip.fade_in, tooltip.fade_out),
        }
    }

    /// Bind a new series. The x domain comes from `time_range`, not from
    /// the sample timestamps.
    pub fn set_series(&mut self, points: Vec<DataPoint>, time_range: TimeRange, data_name: &str) {
        self.points = points;
        self.time_range = time_range;
        self.data_name = data_name.to_string();
        if self.state.area().is_some() {
            self.redraw();
        }
    }

    pub fn set_usage(&mut self, usage: UsageSeries) {
        self.set_series(usage.points, usage.time_range, &usage.data_name);
    }

    /// Lay the chart out into `area`. Both axes are recomputed on resize.
    pub fn layout(&mut self, area: Rect) {
        if !self.state.needs_layout(area) {
            return;
        }
        tracing::debug!(?area, "line chart layout");
        self.state = ChartState::Initialized { area };
        self.redraw();
    }

    fn redraw(&mut self) {
        let Some(area) = self.state.area() else {
            return;
        };

        let (d0, d1) = value_domain(&self.points);
        self.y.set_domain(d0, d1);
        self.x.set_domain(self.time_range.start_time, self.time_range.end_time);

        let provisional = PlotArea::inside(area, self.settings.margin, 0);
        let values = self.y.ticks(PlotArea::tick_count(provisional.height(), CELLS_PER_Y_TICK));
        let labels: Vec<String> = values.iter().map(|v| format_tick(*v)).collect();

        self.plot = PlotArea::inside(area, self.settings.margin, gutter_width(&labels));
        self.x.set_range(self.plot.left, self.plot.right);
        self.y.set_range(self.plot.top, self.plot.bottom);

        self.y_ticks = values
            .iter()
            .zip(labels)
            .map(|(v, label)| AxisTick {
                position: self.y.scale(*v),
                label,
            })
            .collect();
        self.x_ticks = self
            .x
            .ticks(PlotArea::tick_count(self.plot.width(), CELLS_PER_X_TICK))
            .into_iter()
            .map(|ts| AxisTick {
                position: self.x.scale(ts),
                label: format_timestamp(ts, TIME_TICK_FORMAT),
            })
            .collect();

        let (x, y) = (&self.x, &self.y);
        self.path = self.points.iter().map(|p| (x.scale(p.date), y.scale(p.value))).collect();

        let place = |index: usize, p: &DataPoint| Marker {
            index,
            x: x.scale(p.date),
            y: y.scale(p.value),
        };
        let join = Join::apply(&mut self.markers, &self.points, place, |m, i, p| {
            *m = place(i, p)
        });
        tracing::debug!(
            points = self.points.len(),
            exit = join.exit.len(),
            enter = join.enter.len(),
            "line chart markers joined"
        );

        if self.hovered.is_some_and(|i| i >= self.markers.len()) {
            self.hovered = None;
            self.tooltip.clear();
        }
    }

    /// Update hover state for a pointer at (`column`, `row`).
    pub fn hover(&mut self, column: u16, row: u16, now: Instant) -> bool {
        match self.marker_at(column, row) {
            Some(index) => {
                let point = self.points[index];
                if self.hovered == Some(index) {
                    self.tooltip.move_to(tooltip_anchor(column, row));
                } else {
                    let lines = vec![
                        format!("Time: {}", format_timestamp(point.date, TOOLTIP_TIME_FORMAT)),
                        format!("New {} count: {}", self.data_name, format_tick(point.value)),
                    ];
                    self.tooltip.show(lines, tooltip_anchor(column, row), now);
                    self.hovered = Some(index);
                }
                true
            }
            None => {
                self.leave(now);
                false
            }
        }
    }

    pub fn leave(&mut self, now: Instant) {
        self.hovered = None;
        self.tooltip.hide(now);
    }

    /// Nearest marker within the hover radius of the cell centre.
    pub fn marker_at(&self, column: u16, row: u16) -> Option<usize> {
        let cx = column as f64 + 0.5;
        let cy = row as f64 + 0.5;
        let reach = self.settings.marker_radius + 0.5;
        self.markers
            .iter()
            .filter(|m| (m.x - cx).abs() <= reach && (m.y - cy).abs() <= reach)
            .min_by(|a, b| {
                let da = (a.x - cx).powi(2) + (a.y - cy).powi(2);
                let db = (b.x - cx).powi(2) + (b.y - cy).powi(2);
                da.total_cmp(&db)
            })
            .map(|m| m.index)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Path vertices in input order.
    pub fn path(&self) -> &[(f64, f64)] {
        &self.path
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn x_ticks(&self) -> &[AxisTick] {
        &self.x_ticks
    }

    /// y-axis ticks, bottom to top.
    pub fn y_ticks(&self) -> &[AxisTick] {
        &self.y_ticks
    }

    pub fn y_domain(&self) -> (f64, f64) {
        self.y.domain()
    }

    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    pub fn marker_radius(&self) -> f64 {
        self.settings.marker_radius
    }

    pub fn hovered(&self) -> Option<&DataPoint> {
        self.hovered.and_then(|i| self.points.get(i))
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

/// `[max + 1, min - 1]`, so extreme samples never touch the plot edges.
/// An empty series behaves as if every value were zero.
fn value_domain(points: &[DataPoint]) -> (f64, f64) {
    let values = points.iter().map(|p| p.value).filter(|v| v.is_finite());
    let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
    .unwrap_or((0.0, 0.0));
    (max + 1.0, min - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn two_points() -> LineChart {
        let mut chart = LineChart::default();
        chart.set_series(
            vec![DataPoint::new(0, 1.0), DataPoint::new(1000, 3.0)],
            TimeRange::new(0, 1000),
            "responses",
        );
        chart.layout(area());
        chart
    }

    #[test]
    fn test_two_points_domain() {
        let chart = two_points();
        assert_eq!(chart.path().len(), 2);
        assert_eq!(chart.markers().len(), 2);
        assert_eq!(chart.y_domain(), (4.0, 0.0));
    }

    #[test]
    fn test_x_positions_within_margins() {
        let mut chart = LineChart::default();
        let points: Vec<DataPoint> =
            (0..=20).map(|i| DataPoint::new(i * 500, (i % 7) as f64)).collect();
        chart.set_series(points, TimeRange::new(0, 10_000), "sessions");
        chart.layout(area());

        let margin = LineSettings::default().margin as f64;
        for (x, _) in chart.path() {
            assert!(*x >= margin && *x <= area().width as f64 - margin, "x = {x}");
        }
        // Range ends map exactly onto the plot edges.
        assert_eq!(chart.path()[0].0, chart.plot().left);
        assert_eq!(chart.path()[20].0, chart.plot().right);
    }

    #[test]
    fn test_path_length_matches_input() {
        let mut chart = LineChart::default();
        chart.layout(area());
        for n in [0usize, 1, 5, 3] {
            let points = (0..n).map(|i| DataPoint::new(i as i64, i as f64)).collect();
            chart.set_series(points, TimeRange::new(0, 10), "x");
            assert_eq!(chart.path().len(), n);
            assert_eq!(chart.markers().len(), n);
        }
    }

    #[test]
    fn test_extremes_do_not_touch_axes() {
        let chart = two_points();
        let plot = chart.plot();
        for (_, y) in chart.path() {
            assert!(*y > plot.top && *y < plot.bottom);
        }
        // The larger value sits higher on screen.
        assert!(chart.path()[1].1 < chart.path()[0].1);
    }

    #[test]
    fn test_resize_recomputes_both_axes() {
        let mut chart = two_points();
        let before = chart.path().to_vec();
        chart.layout(Rect::new(0, 0, 120, 40));
        let after = chart.path();
        assert!(after[1].0 > before[1].0);
        assert!(after[0].1 > before[0].1);
        assert_eq!(chart.y_domain(), (4.0, 0.0));
    }

    #[test]
    fn test_empty_series_fallback() {
        let mut chart = LineChart::default();
        chart.set_series(Vec::new(), TimeRange::new(0, 1000), "responses");
        chart.layout(area());
        assert!(chart.is_empty());
        assert!(chart.path().is_empty());
        assert_eq!(chart.y_domain(), (1.0, -1.0));
        assert!(chart.y_ticks().iter().all(|t| t.position.is_finite()));
    }

    #[test]
    fn test_hover_marker_tooltip_fades() {
        let mut chart = two_points();
        let t0 = Instant::now();
        let marker = chart.markers()[1];

        assert!(chart.hover(marker.x as u16, marker.y as u16, t0));
        assert_eq!(chart.hovered().unwrap().value, 3.0);
        assert_eq!(chart.tooltip().lines()[1], "New responses count: 3");
        assert!(chart.tooltip().lines()[0].starts_with("Time: "));
        assert_eq!(chart.tooltip().opacity(t0), 0.0);
        assert!(chart.tooltip().is_visible(t0 + Duration::from_millis(200)));

        let t1 = t0 + Duration::from_millis(300);
        assert!(!chart.hover(0, 0, t1));
        assert!(chart.tooltip().is_visible(t1 + Duration::from_millis(100)));
        assert!(!chart.tooltip().is_visible(t1 + Duration::from_millis(500)));
    }
}
