//! Hover tooltips owned by a single chart.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

/// Opacity a shown tooltip settles at.
pub const SHOWN_OPACITY: f64 = 0.9;

/// A linear opacity transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl Fade {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// A fade that has already finished at `to`.
    pub fn settled(to: f64, now: Instant) -> Self {
        Self::new(to, to, now, Duration::ZERO)
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}

/// A floating label anchored near the pointer.
///
/// With zero fade durations the tooltip toggles instantly, which is how
/// the histogram uses it.
#[derive(Debug, Clone)]
pub struct Tooltip {
    lines: Vec<String>,
    anchor: (u16, u16),
    fade: Option<Fade>,
    fade_in: Duration,
    fade_out: Duration,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Tooltip {
    pub fn new(fade_in: Duration, fade_out: Duration) -> Self {
        Self {
            lines: Vec::new(),
            anchor: (0, 0),
            fade: None,
            fade_in,
            fade_out,
        }
    }

    /// Show `lines` anchored at `anchor` (column, row).
    pub fn show(&mut self, lines: Vec<String>, anchor: (u16, u16), now: Instant) {
        let current = self.opacity(now);
        let already_showing = self.fade.is_some_and(|f| f.target() == SHOWN_OPACITY);
        self.lines = lines;
        self.anchor = anchor;
        if !already_showing {
            self.fade = Some(Fade::new(current, SHOWN_OPACITY, now, self.fade_in));
        }
    }

    /// Move the anchor without restarting the fade.
    pub fn move_to(&mut self, anchor: (u16, u16)) {
        self.anchor = anchor;
    }

    pub fn hide(&mut self, now: Instant) {
        let current = self.opacity(now);
        if current <= 0.0 {
            self.fade = None;
            return;
        }
        if self.fade.is_some_and(|f| f.target() == 0.0) {
            return;
        }
        self.fade = Some(Fade::new(current, 0.0, now, self.fade_out));
    }

    /// Drop content and state immediately.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.fade = None;
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        self.fade.map_or(0.0, |f| f.opacity(now))
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        !self.lines.is_empty() && self.opacity(now) > 0.0
    }

    /// Whether the tooltip is still fading and needs another frame.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.fade.is_some_and(|f| !f.is_done(now))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn anchor(&self) -> (u16, u16) {
        self.anchor
    }

    /// Popup rectangle (with a one-cell border) kept inside `bounds`.
    pub fn placement(&self, bounds: Rect) -> Rect {
        let content_width = self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = (content_width as u16).saturating_add(4).min(bounds.width);
        let height = (self.lines.len() as u16).saturating_add(2).min(bounds.height);

        let (col, row) = self.anchor;
        let max_x = bounds.right().saturating_sub(width);
        let max_y = bounds.bottom().saturating_sub(height);
        let x = col.clamp(bounds.x, max_x.max(bounds.x));
        let y = row.clamp(bounds.y, max_y.max(bounds.y));
        Rect::new(x, y, width, height)
    }
}
