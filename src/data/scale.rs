//! Scales mapping data values onto cell coordinates.
//!
//! The semantics follow the usual charting conventions: a band scale for
//! discrete categories, a linear scale for continuous values and a time
//! scale over epoch milliseconds. All scales work in `f64` cell units so
//! that callers can round where the terminal grid demands it.

use std::collections::HashSet;
use std::hash::Hash;

use chrono::{Local, TimeZone};

/// Tick format for time axes (e.g. "Mar 04, 13:37").
pub const TIME_TICK_FORMAT: &str = "%b %d, %H:%M";

/// Maps discrete categories to evenly spaced, padded bands.
#[derive(Debug, Clone)]
pub struct BandScale<K> {
    domain: Vec<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl<K> Default for BandScale<K> {
    fn default() -> Self {
        Self {
            domain: Vec::new(),
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }
}

impl<K: Clone + Eq + Hash> BandScale<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the domain. Duplicates are dropped, first occurrence wins.
    pub fn domain<I: IntoIterator<Item = K>>(&mut self, keys: I) -> &mut Self {
        let mut seen = HashSet::new();
        self.domain = keys.into_iter().filter(|k| seen.insert(k.clone())).collect();
        self
    }

    pub fn range(&mut self, start: f64, end: f64) -> &mut Self {
        self.range = (start, end);
        self
    }

    /// Set inner and outer padding to the same fraction of a step.
    pub fn padding(&mut self, padding: f64) -> &mut Self {
        let padding = padding.clamp(0.0, 1.0);
        self.padding_inner = padding;
        self.padding_outer = padding;
        self
    }

    pub fn keys(&self) -> &[K] {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let denom = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        (r1 - r0).abs() / denom
    }

    /// Width of a single band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `key`, or `None` if the key is not in the domain.
    pub fn position(&self, key: &K) -> Option<f64> {
        let index = self.domain.iter().position(|k| k == key)?;
        Some(self.position_at(index))
    }

    /// Start of the band at `index` in domain order.
    pub fn position_at(&self, index: usize) -> f64 {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = self.step();
        let start = lo + (hi - lo - step * (n - self.padding_inner)) * self.align;
        if r1 < r0 {
            // Reversed range: the first key sits at the high end.
            let reversed = self.domain.len().saturating_sub(1 + index);
            start + step * reversed as f64
        } else {
            start + step * index as f64
        }
    }
}

/// Maps a continuous domain onto a continuous range.
///
/// The domain may be inverted (`d0 > d1`). A degenerate domain maps every
/// value to the start of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn set_domain(&mut self, d0: f64, d1: f64) -> &mut Self {
        self.domain = (d0, d1);
        self
    }

    pub fn set_range(&mut self, r0: f64, r1: f64) -> &mut Self {
        self.range = (r0, r1);
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    pub fn invert(&self, position: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (position - r0) / span * (d1 - d0)
    }

    /// Roughly `count` evenly spaced round values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        nice_ticks(lo, hi, count)
    }
}

/// Tick increment with a 1, 2 or 5 mantissa.
fn tick_increment(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count.max(1) as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() || count == 0 {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }
    let step = tick_increment(lo, hi, count);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Candidate tick intervals for time axes, in milliseconds.
const TIME_INTERVALS: &[i64] = &[
    1_000,
    5_000,
    15_000,
    30_000,
    60_000,
    5 * 60_000,
    15 * 60_000,
    30 * 60_000,
    3_600_000,
    3 * 3_600_000,
    6 * 3_600_000,
    12 * 3_600_000,
    86_400_000,
    2 * 86_400_000,
    7 * 86_400_000,
    30 * 86_400_000,
];

/// A linear scale over epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: i64, end: i64, range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((start as f64, end as f64), range),
        }
    }

    pub fn set_domain(&mut self, start: i64, end: i64) -> &mut Self {
        self.inner.set_domain(start as f64, end as f64);
        self
    }

    pub fn set_range(&mut self, r0: f64, r1: f64) -> &mut Self {
        self.inner.set_range(r0, r1);
        self
    }

    pub fn domain(&self) -> (i64, i64) {
        let (a, b) = self.inner.domain();
        (a as i64, b as i64)
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn scale(&self, ts: i64) -> f64 {
        self.inner.scale(ts as f64)
    }

    /// Timestamps on a round interval, about `count` of them.
    ///
    /// Windows longer than the listed intervals step by whole days, so the
    /// tick count stays near `count` however wide the window is.
    pub fn ticks(&self, count: usize) -> Vec<i64> {
        let (start, end) = self.domain();
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        if count == 0 || lo == hi {
            return vec![lo];
        }
        let (lo, hi) = (i128::from(lo), i128::from(hi));
        let target = (hi - lo) / count as i128;
        let interval = TIME_INTERVALS
            .iter()
            .map(|&i| i128::from(i))
            .find(|&i| i >= target)
            .unwrap_or_else(|| day_interval(target));
        let first = lo.div_euclid(interval) + i128::from(lo.rem_euclid(interval) != 0);
        let last = hi.div_euclid(interval);
        (first..=last).filter_map(|i| i64::try_from(i * interval).ok()).collect()
    }
}

const DAY_MS: i128 = 86_400_000;

/// Smallest 1, 2 or 5 x 10^k days covering `target` milliseconds.
fn day_interval(target: i128) -> i128 {
    let days = (target + DAY_MS - 1) / DAY_MS;
    let mut magnitude: i128 = 1;
    loop {
        for m in [1, 2, 5] {
            if m * magnitude >= days {
                return m * magnitude * DAY_MS;
            }
        }
        magnitude *= 10;
    }
}

/// Format an epoch-millisecond timestamp in local time.
pub fn format_timestamp(ts: i64, fmt: &str) -> String {
    match Local.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.format(fmt).to_string(),
        None => ts.to_string(),
    }
}

/// Format a tick value, dropping the fraction for whole numbers.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_scale_padding() {
        let mut scale = BandScale::new();
        scale.domain(["a", "b"]).range(0.0, 100.0).padding(0.2);

        // step = 100 / (2 - 0.2 + 0.4)
        let step = 100.0 / 2.2;
        assert!((scale.step() - step).abs() < 1e-9);
        assert!((scale.bandwidth() - step * 0.8).abs() < 1e-9);

        let a = scale.position(&"a").unwrap();
        let b = scale.position(&"b").unwrap();
        assert!((a - step * 0.2).abs() < 1e-9);
        assert!((b - a - step).abs() < 1e-9);
        // Bands stay inside the range with symmetric outer padding.
        assert!((100.0 - (b + scale.bandwidth()) - a).abs() < 1e-9);
        assert!(scale.position(&"c").is_none());
    }

    #[test]
    fn test_band_scale_dedups_domain() {
        let mut scale = BandScale::new();
        scale.domain(["a", "b", "a"]);
        assert_eq!(scale.keys(), &["a", "b"]);
    }

    #[test]
    fn test_band_scale_empty() {
        let mut scale: BandScale<&str> = BandScale::new();
        scale.range(0.0, 10.0).padding(0.2);
        assert!(scale.is_empty());
        assert!(scale.bandwidth().is_finite());
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new((0.0, 5.0), (20.0, 0.0));
        assert_eq!(scale.scale(0.0), 20.0);
        assert_eq!(scale.scale(5.0), 0.0);
        assert_eq!(scale.scale(2.5), 10.0);
        assert_eq!(scale.invert(10.0), 2.5);
    }

    #[test]
    fn test_linear_scale_degenerate_domain() {
        let scale = LinearScale::new((0.0, 0.0), (20.0, 0.0));
        assert_eq!(scale.scale(0.0), 20.0);
        assert_eq!(scale.scale(7.0), 20.0);
    }

    #[test]
    fn test_linear_ticks() {
        let scale = LinearScale::new((0.0, 5.0), (0.0, 1.0));
        assert_eq!(scale.ticks(5), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let scale = LinearScale::new((0.0, 1000.0), (0.0, 1.0));
        assert_eq!(scale.ticks(5), vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);

        // Inverted domains still yield ascending ticks.
        let scale = LinearScale::new((4.0, 0.0), (0.0, 1.0));
        assert_eq!(scale.ticks(4), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_time_scale_ticks_on_interval() {
        let scale = TimeScale::new(0, 60_000, (0.0, 100.0));
        let ticks = scale.ticks(4);
        assert_eq!(ticks, vec![0, 15_000, 30_000, 45_000, 60_000]);
        assert_eq!(scale.scale(30_000), 50.0);
    }

    #[test]
    fn test_time_ticks_for_long_windows_stay_bounded() {
        let scale = TimeScale::new(0, 1_000_000_000_000_000, (0.0, 100.0));
        let ticks = scale.ticks(10);
        assert!(ticks.len() >= 2 && ticks.len() <= 11, "{} ticks", ticks.len());
        // Steps are whole days.
        assert_eq!((ticks[1] - ticks[0]) % 86_400_000, 0);
    }

    #[test]
    fn test_time_ticks_for_full_i64_window() {
        let scale = TimeScale::new(i64::MIN, i64::MAX, (0.0, 100.0));
        let ticks = scale.ticks(10);
        assert!(!ticks.is_empty() && ticks.len() <= 11);
        assert!(scale.scale(0).is_finite());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(5.0), "5");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(-1.0), "-1");
    }
}
