//! Tooltip popup rendering.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use crate::chart::Tooltip;

use super::Theme;

/// Draw `tooltip` inside `bounds` if it is visible at `now`.
///
/// Terminals have no alpha channel, so a tooltip that is fading in or out
/// below half opacity is drawn dimmed.
pub fn render(frame: &mut Frame, tooltip: &Tooltip, bounds: Rect, now: Instant, theme: &Theme) {
    if !tooltip.is_visible(now) {
        return;
    }

    let area = tooltip.placement(bounds);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let mut style = theme.tooltip;
    if tooltip.opacity(now) < 0.5 {
        style = style.add_modifier(Modifier::DIM);
    }

    let lines: Vec<Line> = tooltip.lines().iter().map(|l| Line::from(l.as_str())).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .padding(Padding::horizontal(1))
        .style(style);

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, buffer::Buffer, widgets::Paragraph, Terminal};

    fn draw(tooltip: &Tooltip, now: Instant) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                let filler = vec![Line::from("x".repeat(area.width as usize)); area.height as usize];
                frame.render_widget(Paragraph::new(filler), area);
                render(frame, tooltip, area, now, &theme);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_popup_clears_what_is_under_it() {
        let mut tip = Tooltip::default();
        let now = Instant::now();
        tip.show(vec!["hello".into()], (4, 2), now);

        let buf = draw(&tip, now);
        let area = tip.placement(buf.area);
        assert!(row_text(&buf, area.y + 1).contains("hello"));
        // Padding cell inside the border was cleared of the filler.
        assert_eq!(buf[(area.x + 1, area.y + 1)].symbol(), " ");
        assert!(!buf[(area.x, area.y)].modifier.contains(Modifier::DIM));
        // Outside the popup the filler is untouched.
        assert_eq!(buf[(0, 0)].symbol(), "x");
    }

    #[test]
    fn test_fading_popup_is_dimmed() {
        let mut tip = Tooltip::new(Duration::from_millis(200), Duration::from_millis(500));
        let t0 = Instant::now();
        tip.show(vec!["hello".into()], (4, 2), t0);

        let early = draw(&tip, t0 + Duration::from_millis(50));
        let area = tip.placement(early.area);
        assert!(row_text(&early, area.y + 1).contains("hello"));
        assert!(early[(area.x, area.y)].modifier.contains(Modifier::DIM));

        let settled = draw(&tip, t0 + Duration::from_millis(300));
        assert!(!settled[(area.x, area.y)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_hidden_popup_draws_nothing() {
        let tip = Tooltip::default();
        let buf = draw(&tip, Instant::now());
        assert!(row_text(&buf, 2).chars().all(|c| c == 'x'));
    }
}
