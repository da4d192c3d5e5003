//! Log frequency histogram rendering.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
    Frame,
};

use crate::app::App;
use crate::chart::HistogramChart;

use super::{render_empty, tooltip, Theme};

/// Partial block glyphs, indexed by eighths filled from the bottom.
const BAR_EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the histogram view into `area`.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Log Frequency by Source Location ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.histogram.layout(inner);
    if app.histogram.is_empty() {
        render_empty(frame, inner, "No log data", &app.theme);
        return;
    }

    frame.render_widget(
        HistogramView {
            chart: &app.histogram,
            theme: &app.theme,
        },
        inner,
    );

    let bounds = frame.area();
    tooltip::render(frame, app.histogram.tooltip(), bounds, Instant::now(), &app.theme);
}

/// Draws the axes and bars of a laid-out [`HistogramChart`].
pub struct HistogramView<'a> {
    pub chart: &'a HistogramChart,
    pub theme: &'a Theme,
}

impl Widget for HistogramView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plot = self.chart.plot();
        let left = plot.left as u16;
        let right = plot.right as u16;
        let axis_row = plot.bottom as u16;
        if left == 0 || axis_row <= plot.top as u16 {
            return;
        }
        let axis_col = left - 1;

        // y axis with right-aligned labels in the gutter
        for row in plot.top as u16..axis_row {
            put(buf, area, axis_col, row, '│', self.theme.axis);
        }
        for tick in self.chart.y_ticks() {
            let row = (tick.position.floor() as u16).min(axis_row.saturating_sub(1));
            let width = tick.label.chars().count() as u16;
            let x = axis_col.saturating_sub(width);
            if x >= area.x && area.contains(Position::new(x, row)) {
                buf.set_string(x, row, &tick.label, self.theme.axis);
            }
            put(buf, area, axis_col, row, '┤', self.theme.axis);
        }

        // x axis
        put(buf, area, axis_col, axis_row, '└', self.theme.axis);
        for col in left..right {
            put(buf, area, col, axis_row, '─', self.theme.axis);
        }

        // Every bar shares one fill; hover only raises the tooltip.
        let style = Style::default().fg(self.theme.bar);
        for bar in self.chart.bars() {
            let full_from = bar.y.ceil() as u16;
            let partial = bar.y.ceil() - bar.y;
            for col in bar.columns() {
                for row in full_from..axis_row {
                    put(buf, area, col, row, '█', style);
                }
                if partial > 0.0 && full_from > 0 {
                    let eighths = (partial * 8.0).round() as usize;
                    if eighths > 0 {
                        put(buf, area, col, full_from - 1, BAR_EIGHTHS[eighths.min(8)], style);
                    }
                }
            }
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
    use crate::data::{ChartSnapshot, HistogramRecord};
    use crate::source::ChannelSource;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> (tokio::sync::watch::Sender<ChartSnapshot>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::with_theme(Box::new(source), Settings::default(), Theme::dark());
        (tx, app)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn rendered(records: Vec<HistogramRecord>) -> (HistogramChart, Buffer) {
        let area = Rect::new(0, 0, 40, 20);
        let mut chart = HistogramChart::default();
        chart.set_data(records);
        chart.layout(area);
        let mut buf = Buffer::empty(area);
        HistogramView {
            chart: &chart,
            theme: &Theme::dark(),
        }
        .render(area, &mut buf);
        (chart, buf)
    }

    fn column_fill(buf: &Buffer, col: u16) -> usize {
        (0..buf.area.height).filter(|&row| buf[(col, row)].symbol() == "█").count()
    }

    #[test]
    fn test_taller_count_fills_more_cells() {
        let (chart, buf) = rendered(vec![
            HistogramRecord::new("a.ts", "f", 5),
            HistogramRecord::new("b.ts", "g", 2),
        ]);
        let a = chart.bars()[0].columns().start;
        let b = chart.bars()[1].columns().start;
        assert!(column_fill(&buf, a) > column_fill(&buf, b));
        assert!(column_fill(&buf, b) > 0);
    }

    #[test]
    fn test_axis_labels_drawn() {
        let (chart, buf) = rendered(vec![HistogramRecord::new("a.ts", "f", 5)]);
        let top = chart.y_ticks().last().unwrap();
        let row = top.position.floor() as u16;
        let line: String = (0..buf.area.width).map(|x| buf[(x, row)].symbol()).collect();
        assert!(line.contains('5'));
        assert!(line.contains('┤'));
    }

    #[test]
    fn test_empty_histogram_shows_message() {
        let (_tx, mut app) = app();
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal
            .draw(|frame| render(frame, &mut app, frame.area()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("No log data"));
        assert!(text.contains("Log Frequency by Source Location"));
        assert!(!text.contains('┤'));
    }

    #[test]
    fn test_hovered_bar_keeps_uniform_fill_and_shows_tooltip() {
        let (tx, mut app) = app();
        tx.send(ChartSnapshot {
            histogram: vec![
                HistogramRecord::new("a.ts", "f", 5),
                HistogramRecord::new("b.ts", "g", 2),
            ],
            usage: None,
        })
        .unwrap();
        app.reload_data().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, &mut app, frame.area()))
            .unwrap();

        let bar = app.histogram.bars()[0].clone();
        let row = app.histogram.plot().bottom as u16 - 1;
        assert!(app.hover(bar.columns().start, row, Instant::now()));
        terminal
            .draw(|frame| render(frame, &mut app, frame.area()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("File: a.ts"));
        assert!(text.contains("Frequency: 5"));

        let buf = terminal.backend().buffer();
        let bar_colors: Vec<_> = buf
            .content()
            .iter()
            .filter(|c| c.symbol() == "█")
            .map(|c| c.fg)
            .collect();
        assert!(!bar_colors.is_empty());
        assert!(bar_colors.iter().all(|fg| *fg == app.theme.bar));
    }
}
