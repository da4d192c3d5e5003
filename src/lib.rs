//! # statscope
//!
//! A terminal dashboard and library for two statistics charts: a histogram
//! of log frequency per source location and a line chart of a usage count
//! over time.
//!
//! Chart data arrives pre-computed as a [`ChartSnapshot`] from a file, an
//! in-process channel, or a network stream. Both charts lay themselves out
//! for whatever area they are given, rebinding their visual elements to the
//! data whenever the data or the area changes, and show a tooltip when the
//! mouse hovers a bar or a point.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│  chart   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │(geometry)│    │(cells)  │    │          │  │
//! │  └────┬────┘    └────┬─────┘    └─────────┘    └──────────┘  │
//! │       │              │                                       │
//! │       ▼              ▼                                       │
//! │  ┌─────────┐    ┌──────────┐                                 │
//! │  │ source  │    │   data   │  scales, join, records          │
//! │  │ (input) │    └──────────┘                                 │
//! │  └─────────┘◀── FileSource | StreamSource | ChannelSource    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view switching and pointer routing
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for file polling, TCP streams, and channel-based input
//! - **[`data`]**: Input records, band/linear/time scales and the positional join
//! - **[`chart`]**: [`HistogramChart`] and [`LineChart`] with their tooltips
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`export`]**: Writes laid-out chart geometry as JSON
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a JSON file
//! statscope --file stats.json
//!
//! # Receive newline-delimited snapshots over TCP
//! statscope --connect localhost:9090
//!
//! # Lay the charts out at 120x40 and write the geometry
//! statscope --file stats.json --export charts.json --size 120x40
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use statscope::{App, FileSource, Settings};
//!
//! let source = Box::new(FileSource::new("stats.json"));
//! let app = App::new(source, Settings::default());
//! ```
//!
//! ### As a library with stream source (TCP, etc.)
//!
//! ```no_run
//! use std::io::Cursor;
//! use statscope::{App, Settings, StreamSource};
//!
//! # tokio_test::block_on(async {
//! // Example with a cursor (in practice, use TcpStream)
//! let data = b"{\"histogram\":[]}\n";
//! let stream = Cursor::new(data.to_vec());
//! let source = StreamSource::spawn(stream, "example");
//! let app = App::new(Box::new(source), Settings::default());
//! # });
//! ```
//!
//! ### Driving the charts directly
//!
//! ```
//! use ratatui::layout::Rect;
//! use statscope::{HistogramChart, HistogramRecord};
//!
//! let mut chart = HistogramChart::default();
//! chart.set_data(vec![
//!     HistogramRecord::new("server.ts", "handle", 5),
//!     HistogramRecord::new("db.ts", "query", 2),
//! ]);
//! chart.layout(Rect::new(0, 0, 80, 24));
//! assert_eq!(chart.bars().len(), 2);
//! assert_eq!(chart.y_domain(), (0.0, 5.0));
//! ```

pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use chart::{HistogramChart, LineChart, Tooltip};
pub use config::Settings;
pub use data::{ChartSnapshot, DataPoint, HistogramRecord, SourceLocation, TimeRange, UsageSeries};
pub use source::{ChannelSource, DataSource, FileSource, StreamSource};
