//! Terminal UI rendering using ratatui.
//!
//! Chart geometry is computed by [`crate::chart`]; the modules here turn it
//! into cells.
//!
//! ## Submodules
//!
//! - [`histogram`]: Bars, y axis and empty state of the log histogram
//! - [`line`]: Braille line, point markers and time axis of the usage chart
//! - [`tooltip`]: Popup drawing for a chart's owned tooltip
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Chart (histogram/line::render)       │
//! │   └─ tooltip::render on top          │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//! ```

pub mod common;
pub mod histogram;
pub mod line;
pub mod theme;
pub mod tooltip;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Rect},
    widgets::Paragraph,
    Frame,
};

/// Centered one-line message shown in place of an empty chart.
fn render_empty(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    let paragraph = Paragraph::new(message).alignment(Alignment::Center).style(theme.muted);
    frame.render_widget(paragraph, row);
}
