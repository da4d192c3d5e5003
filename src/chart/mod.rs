//! Chart models: geometry, data binding and hover state.
//!
//! Each chart owns its scales, its bound visual elements and its
//! [`Tooltip`]. Rendering lives in [`crate::ui`]; this module only decides
//! where things go, so it can be tested without a terminal.
//!
//! Both charts share the same lifecycle:
//!
//! ```text
//!   Uninitialized ──layout(area)──▶ Initialized { area }
//!                                        │  ▲
//!                     set_data / resize  └──┘  (redraw: domains, join)
//! ```

pub mod histogram;
pub mod line;
pub mod tooltip;

pub use histogram::{Bar, HistogramChart};
pub use line::{LineChart, Marker};
pub use tooltip::{Fade, Tooltip};

use ratatui::layout::Rect;

/// Lifecycle of a chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartState {
    /// No geometry yet; data may already be bound.
    #[default]
    Uninitialized,
    /// Laid out for the given container.
    Initialized { area: Rect },
}

impl ChartState {
    pub fn area(&self) -> Option<Rect> {
        match self {
            ChartState::Uninitialized => None,
            ChartState::Initialized { area } => Some(*area),
        }
    }

    /// Whether laying out into `area` requires recomputing geometry.
    pub fn needs_layout(&self, area: Rect) -> bool {
        self.area() != Some(area)
    }
}

/// A labelled tick on an axis. `position` is in absolute cell coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// The region inside the margins and axis gutters where marks are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Shrink `area` by `margin` on every side, a left gutter for y labels
    /// and one bottom row for the x axis.
    pub fn inside(area: Rect, margin: u16, gutter: u16) -> Self {
        let left = area.x.saturating_add(margin).saturating_add(gutter);
        let right = area.right().saturating_sub(margin).max(left);
        let top = area.y.saturating_add(margin);
        let bottom = area.bottom().saturating_sub(margin).saturating_sub(1).max(top);
        Self {
            left: left as f64,
            top: top as f64,
            right: right as f64,
            bottom: bottom as f64,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Ticks to aim for along an axis of `length` cells.
    pub fn tick_count(length: f64, cells_per_tick: f64) -> usize {
        ((length / cells_per_tick) as usize).clamp(2, 10)
    }
}

/// Width of the y-label gutter, including one cell of spacing.
pub(crate) fn gutter_width(labels: &[String]) -> u16 {
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (widest as u16).saturating_add(1)
}
