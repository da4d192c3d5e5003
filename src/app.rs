//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::chart::{HistogramChart, LineChart};
use crate::config::Settings;
use crate::data::ChartSnapshot;
use crate::export;
use crate::source::DataSource;
use crate::ui::Theme;

/// The chart shown in the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Log frequency by source location.
    Histogram,
    /// Usage statistic over time.
    Usage,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Histogram => View::Usage,
            View::Usage => View::Histogram,
        }
    }

    pub fn prev(self) -> Self {
        // Two views: previous and next coincide.
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Histogram => "Log Frequency",
            View::Usage => "Usage",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    source: Box<dyn DataSource>,
    pub snapshot: Option<ChartSnapshot>,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,
    pub settings: Settings,

    pub histogram: HistogramChart,
    pub line: LineChart,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and settings.
    pub fn new(source: Box<dyn DataSource>, settings: Settings) -> Self {
        let theme = Theme::from_name(&settings.theme);
        Self::with_theme(source, settings, theme)
    }

    /// Like [`App::new`] without probing the terminal for its background.
    pub fn with_theme(source: Box<dyn DataSource>, settings: Settings, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Histogram,
            show_help: false,
            source,
            snapshot: None,
            last_updated: None,
            load_error: None,
            histogram: HistogramChart::new(settings.histogram),
            line: LineChart::new(settings.line, settings.tooltip),
            settings,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and push new data into the charts.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) if no new data.
    pub fn reload_data(&mut self) -> Result<bool> {
        let Some(snapshot) = self.source.poll() else {
            if let Some(err) = self.source.error() {
                if self.load_error.as_deref() != Some(err.as_str()) {
                    tracing::warn!(source = self.source.description(), error = %err, "poll failed");
                }
                self.load_error = Some(err);
            }
            return Ok(false);
        };

        tracing::info!(
            records = snapshot.histogram.len(),
            points = snapshot.usage.as_ref().map_or(0, |u| u.points.len()),
            "snapshot received"
        );
        self.apply_snapshot(snapshot);
        Ok(true)
    }

    /// Bind a snapshot to both charts.
    pub fn apply_snapshot(&mut self, snapshot: ChartSnapshot) {
        self.histogram.set_data(snapshot.histogram.clone());
        let usage = snapshot.usage.clone().unwrap_or_default();
        self.line.set_usage(usage);
        self.snapshot = Some(snapshot);
        self.last_updated = Some(Instant::now());
        self.load_error = None;
    }

    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view, hiding tooltips of the one left behind.
    pub fn set_view(&mut self, view: View) {
        if view != self.current_view {
            self.leave_charts(Instant::now());
        }
        self.current_view = view;
    }

    /// Route a pointer position to the visible chart.
    pub fn hover(&mut self, column: u16, row: u16, now: Instant) -> bool {
        match self.current_view {
            View::Histogram => self.histogram.hover(column, row, now),
            View::Usage => self.line.hover(column, row, now),
        }
    }

    /// Hide every tooltip.
    pub fn leave_charts(&mut self, now: Instant) {
        self.histogram.leave(now);
        self.line.leave(now);
    }

    /// Whether a tooltip transition needs more frames.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.histogram.tooltip().is_animating(now) || self.line.tooltip().is_animating(now)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current charts' geometry to a JSON file.
    pub fn export_state(&self, path: &Path, width: u16, height: u16) -> Result<()> {
        let Some(ref snapshot) = self.snapshot else {
            anyhow::bail!("No data to export");
        };
        export::write_export(snapshot, &self.settings, width, height, path)
    }
}
