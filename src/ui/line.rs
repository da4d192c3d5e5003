//! Usage statistics line chart rendering.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    symbols::Marker as CanvasMarker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Widget,
    },
    Frame,
};

use crate::app::App;
use crate::chart::LineChart;

use super::{render_empty, tooltip, Theme};

/// Glyph drawn for each sample.
const MARKER_GLYPH: char = '●';

/// Render the usage view into `area`.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = if app.line.data_name().is_empty() {
        " Usage ".to_string()
    } else {
        format!(" Usage: {} ", app.line.data_name())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.line.layout(inner);
    if app.line.is_empty() {
        render_empty(frame, inner, "No usage data", &app.theme);
        return;
    }

    frame.render_widget(
        LineView {
            chart: &app.line,
            theme: &app.theme,
        },
        inner,
    );

    let bounds = frame.area();
    tooltip::render(frame, app.line.tooltip(), bounds, Instant::now(), &app.theme);
}

/// Draws the axes, path and markers of a laid-out [`LineChart`].
pub struct LineView<'a> {
    pub chart: &'a LineChart,
    pub theme: &'a Theme,
}

impl Widget for LineView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plot = self.chart.plot();
        let left = plot.left as u16;
        let right = plot.right as u16;
        let top = plot.top as u16;
        let axis_row = plot.bottom as u16;
        if left == 0 || right <= left || axis_row <= top {
            return;
        }
        let axis_col = left - 1;

        for row in top..axis_row {
            put(buf, area, axis_col, row, '│', self.theme.axis);
        }
        for tick in self.chart.y_ticks() {
            let row = (tick.position.floor() as u16).clamp(top, axis_row - 1);
            let width = tick.label.chars().count() as u16;
            let x = axis_col.saturating_sub(width);
            if x >= area.x && area.contains(Position::new(x, row)) {
                buf.set_string(x, row, &tick.label, self.theme.axis);
            }
            put(buf, area, axis_col, row, '┤', self.theme.axis);
        }

        // Time labels on the axis row, skipping any that would overlap.
        let mut next_free = area.x;
        for tick in self.chart.x_ticks() {
            let width = tick.label.chars().count() as u16;
            let x = (tick.position as u16).saturating_sub(width / 2).max(area.x);
            if x < next_free || x.saturating_add(width) > area.right() {
                continue;
            }
            buf.set_string(x, axis_row, &tick.label, self.theme.axis);
            next_free = x + width + 1;
        }

        // Canvas y grows upwards, chart rows grow downwards.
        let plot_rect = Rect::new(left, top, right - left, axis_row - top);
        let height = plot.height();
        let flip = |y: f64| plot.bottom - y;
        let path = self.chart.path();
        let line_color = self.theme.line;
        Canvas::default()
            .marker(CanvasMarker::Braille)
            .x_bounds([plot.left, plot.right])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for pair in path.windows(2) {
                    let (x1, y1) = pair[0];
                    let (x2, y2) = pair[1];
                    ctx.draw(&CanvasLine::new(x1, flip(y1), x2, flip(y2), line_color));
                }
            })
            .render(plot_rect, buf);

        let hovered = self.chart.hovered().copied();
        for (marker, point) in self.chart.markers().iter().zip(self.chart.points()) {
            let col = (marker.x.floor() as u16).min(right.saturating_sub(1));
            let row = (marker.y.floor() as u16).min(axis_row - 1);
            let mut style = Style::default().fg(self.theme.marker);
            if hovered == Some(*point) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            put(buf, area, col, row, MARKER_GLYPH, style);
        }
    }
}

fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, symbol: char, style: Style) {
    if area.contains(Position::new(x, y)) {
        buf[(x, y)].set_char(symbol).set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::data::{ChartSnapshot, DataPoint, TimeRange, UsageSeries};
    use crate::source::ChannelSource;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_one_marker_per_point() {
        let area = Rect::new(0, 0, 80, 24);
        let mut chart = LineChart::default();
        chart.set_series(
            vec![
                DataPoint::new(0, 1.0),
                DataPoint::new(500, 5.0),
                DataPoint::new(1000, 3.0),
            ],
            TimeRange::new(0, 1000),
            "responses",
        );
        chart.layout(area);

        let mut buf = Buffer::empty(area);
        LineView {
            chart: &chart,
            theme: &Theme::dark(),
        }
        .render(area, &mut buf);

        let markers = buf.content().iter().filter(|c| c.symbol() == "●").count();
        assert_eq!(markers, 3);

        // Some braille cells make up the path between markers.
        let braille = buf
            .content()
            .iter()
            .filter(|c| c.symbol().chars().any(|ch| ('\u{2801}'..='\u{28FF}').contains(&ch)))
            .count();
        assert!(braille > 0);
    }

    #[test]
    fn test_empty_usage_shows_message() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        tx.send(ChartSnapshot {
            histogram: Vec::new(),
            usage: Some(UsageSeries {
                data_name: "responses".to_string(),
                time_range: TimeRange::new(0, 1000),
                points: Vec::new(),
            }),
        })
        .unwrap();
        app.reload_data().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| render(frame, &mut app, frame.area()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("No usage data"));
        assert!(text.contains("Usage: responses"));
        assert!(!text.contains('●'));
    }
}
