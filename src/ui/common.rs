//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Tab titles in display order; click handling relies on their widths.
pub const TAB_TITLES: [&str; 2] = [" 1:Log Frequency ", " 2:Usage "];

const TAB_DIVIDER: &str = "|";

/// Render the header bar with a summary of the loaded data.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" STATSCOPE ", Style::default().add_modifier(Modifier::BOLD));

    let Some(ref snapshot) = app.snapshot else {
        let line = Line::from(vec![title, Span::raw("| Loading...")]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let total_logs: u64 = app.histogram.records().iter().map(|r| r.number_of_times).sum();
    let points = snapshot.usage.as_ref().map_or(0, |u| u.points.len());

    let line = Line::from(vec![
        title,
        Span::raw("| "),
        Span::styled(
            format!("{} locations", app.histogram.records().len()),
            Style::default().fg(app.theme.highlight),
        ),
        Span::raw(format!(" ({} logs) | ", total_logs)),
        Span::styled(format!("{} samples", points), Style::default().fg(app.theme.highlight)),
        Span::raw(format!(" | {}", app.source_description())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();

    let selected = match app.current_view {
        View::Histogram => 0,
        View::Usage => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .padding("", "")
        .divider(TAB_DIVIDER);

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Temporary status messages take precedence, then errors, then the
/// time since the last update with the available controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" Error: {} | r:retry q:quit", err))
            .style(Style::default().fg(app.theme.error));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match app.last_updated {
        Some(updated) => format!(
            " {} | Updated {:.1}s ago | Tab:switch mouse:hover e:export ?:help q:quit",
            app.current_view.label(),
            updated.elapsed().as_secs_f64(),
        ),
        None => " Waiting for data... | q:quit".to_string(),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.tab_active)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", bold)]),
        Line::from("  Tab ←/→     Switch charts"),
        Line::from("  1 / 2       Jump to chart"),
        Line::from("  Esc         Hide tooltip"),
        Line::from(""),
        Line::from(vec![Span::styled(" Mouse", bold)]),
        Line::from("  Hover       Show bar/point details"),
        Line::from("  Click tab   Switch charts"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", bold)]),
        Line::from("  r           Reload data"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 19u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Which tab a click at `column` on the tab row lands on.
///
/// Tabs are drawn unpadded as `title|title`, so the titles alone decide
/// the hit boxes.
pub fn tab_at(column: u16) -> Option<View> {
    let divider = TAB_DIVIDER.chars().count() as u16;
    let first = TAB_TITLES[0].chars().count() as u16;
    let second = TAB_TITLES[1].chars().count() as u16;
    if column < first {
        Some(View::Histogram)
    } else if column >= first + divider && column < first + divider + second {
        Some(View::Usage)
    } else {
        None
    }
}
