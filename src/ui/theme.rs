//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Fill color of histogram bars.
    pub bar: Color,
    /// Stroke color of the usage line.
    pub line: Color,
    /// Color of per-sample markers, distinct from the line.
    pub marker: Color,
    /// Color for error messages.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for axis lines and tick labels.
    pub axis: Style,
    /// Style for empty-state messages.
    pub muted: Style,
    /// Style for tooltip popups.
    pub tooltip: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            bar: Color::Rgb(70, 130, 180),
            line: Color::Rgb(0, 123, 255),
            marker: Color::Rgb(255, 193, 7),
            error: Color::Red,
            border: Color::Gray,
            axis: Style::default().fg(Color::Gray),
            muted: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            tooltip: Style::default().fg(Color::White).bg(Color::Black),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            bar: Color::Rgb(70, 130, 180),
            line: Color::Rgb(0, 90, 200),
            marker: Color::Rgb(200, 140, 0),
            error: Color::Red,
            border: Color::DarkGray,
            axis: Style::default().fg(Color::DarkGray),
            muted: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            tooltip: Style::default().fg(Color::White).bg(Color::Black),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Theme by name: "dark", "light", anything else auto-detects.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::auto_detect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light").highlight, Color::Blue);
        assert_eq!(Theme::from_name("DARK").highlight, Color::Cyan);
    }

    #[test]
    fn test_marker_distinct_from_line() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(theme.marker, theme.line);
        }
    }
}
