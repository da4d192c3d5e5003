//! Chart data from a JSON file on disk.
//!
//! A producer rewrites the file whenever its statistics change; the source
//! re-reads it only when the modification time moves forward.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;

use super::{ChartSnapshot, DataSource};

/// Watches one JSON file holding a [`ChartSnapshot`].
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    /// Modification time of the last snapshot handed out.
    seen: Option<SystemTime>,
    last_error: Option<String>,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            description: format!("file: {}", path.display()),
            path,
            seen: None,
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file now, ignoring its modification time.
    pub fn load(&self) -> anyhow::Result<ChartSnapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Whether the file may hold a snapshot not yet handed out.
    fn is_stale(&self, modified: Option<SystemTime>) -> bool {
        match (self.seen, modified) {
            (None, _) => true,
            // A vanished file keeps the charts on their last data.
            (Some(_), None) => false,
            (Some(seen), Some(modified)) => modified > seen,
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<ChartSnapshot> {
        let modified = self.modified();
        if !self.is_stale(modified) {
            return None;
        }

        match self.load() {
            Ok(snapshot) => {
                self.seen = modified;
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %format!("{:#}", e), "file poll failed");
                self.last_error = Some(format!("{:#}", e));
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use std::time::Duration;
    use tempfile::NamedTempFile;

    const STATS: &str = r#"{
        "histogram": [
            { "sourceLocation": { "file": "a.ts", "function": "f" }, "numberOfTimes": 5 },
            { "sourceLocation": { "file": "b.ts", "function": "g" }, "numberOfTimes": 2 }
        ],
        "usage": {
            "dataName": "responses",
            "timeRange": { "startTime": 0, "endTime": 1000 },
            "data": [ { "date": 0, "value": 1 }, { "date": 1000, "value": 3 } ]
        }
    }"#;

    fn stats_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_description_names_the_file() {
        let source = FileSource::new("/tmp/stats.json");
        assert_eq!(source.path(), Path::new("/tmp/stats.json"));
        assert_eq!(source.description(), "file: /tmp/stats.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_first_poll_yields_both_charts() {
        let file = stats_file(STATS);
        let mut source = FileSource::new(file.path());

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.histogram.len(), 2);
        let usage = snapshot.usage.unwrap();
        assert_eq!(usage.data_name, "responses");
        assert_eq!(usage.points.len(), 2);

        // Unchanged file: nothing new to hand out.
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_rewritten_file_is_picked_up() {
        let mut file = stats_file(STATS);
        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());

        std::thread::sleep(Duration::from_millis(10));
        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        write!(file, r#"{{ "histogram": [] }}"#).unwrap();
        file.flush().unwrap();

        // Filesystems with coarse mtime resolution may not report a change.
        if let Some(snapshot) = source.poll() {
            assert!(snapshot.is_empty());
        }
    }

    #[test]
    fn test_missing_file_records_error() {
        let mut source = FileSource::new("/nonexistent/path/stats.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Failed to read"));
        assert!(source.load().is_err());
    }

    #[test]
    fn test_malformed_file_records_error_then_recovers() {
        let mut file = stats_file("{ not json");
        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Failed to parse"));

        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        write!(file, "{}", STATS).unwrap();
        file.flush().unwrap();

        // A failed read never marks the file as seen, so the next poll retries.
        assert_eq!(source.poll().unwrap().histogram.len(), 2);
        assert!(source.error().is_none());
    }
}
