//! Chart input records and the mapping from data space to cell space.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "1s", "500ms")
//! - [`join`]: Positional join of a data sequence onto existing visual elements
//! - [`records`]: Input models ([`HistogramRecord`], [`DataPoint`], [`TimeRange`])
//! - [`scale`]: Band, linear and time scales plus tick generation
//!
//! ## Data Flow
//!
//! ```text
//! ChartSnapshot (raw JSON)
//!        │
//!        ├──▶ HistogramChart::set_data()  ──▶ BandScale + LinearScale ──▶ bars
//!        │
//!        └──▶ LineChart::set_series()     ──▶ TimeScale + LinearScale ──▶ path, markers
//! ```

pub mod duration;
pub mod join;
pub mod records;
pub mod scale;

pub use join::Join;
pub use records::{
    ChartSnapshot, DataPoint, HistogramRecord, SourceKey, SourceLocation, TimeRange, UsageSeries,
};
pub use scale::{BandScale, LinearScale, TimeScale};
