//! Data source abstraction for receiving chart snapshots.
//!
//! Chart data always arrives pre-computed; a source only decides how the
//! latest [`ChartSnapshot`] reaches the TUI (file polling, an in-process
//! channel, or a network stream).

mod channel;
mod file;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use stream::StreamSource;

pub use crate::data::ChartSnapshot;

use std::fmt::Debug;

/// Trait for receiving chart data from various sources.
///
/// # Example
///
/// ```
/// use statscope::{DataSource, FileSource};
///
/// let mut source = FileSource::new("stats.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} histogram records", snapshot.histogram.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<ChartSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;

    /// Returns the error message if the last poll failed.
    fn error(&self) -> Option<String>;
}
