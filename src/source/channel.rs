//! Channel-based data source.
//!
//! Receives chart snapshots via a tokio watch channel, for embedding the
//! charts in a process that already holds the data.

use tokio::sync::watch;

use super::{ChartSnapshot, DataSource};

/// A data source that receives chart snapshots via a channel.
///
/// # Example
///
/// ```
/// use statscope::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("usage-stats");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<ChartSnapshot>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    pub fn new(receiver: watch::Receiver<ChartSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    pub fn create(source_description: &str) -> (watch::Sender<ChartSnapshot>, Self) {
        let (tx, rx) = watch::channel(ChartSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<ChartSnapshot> {
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        if self.receiver.has_changed().is_err() {
            Some("Sender dropped".to_string())
        } else {
            None
        }
    }
}
