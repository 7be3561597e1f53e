//! File-based data source.
//!
//! Polls a JSON file holding a full dashboard frame.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::{ConnectionState, DataSource, Message};
use crate::data::DashboardFrame;

/// A data source that reads dashboard frames from a JSON file.
///
/// The file holds `{"stats": {...}, "events": [...]}`, the same shape the
/// dashboard exports. The source tracks the file's modification time and
/// only re-reads it once it has been updated; each read yields a `Stats`
/// message followed by an `Events` message.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    pending: VecDeque<Message>,
    state: ConnectionState,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            pending: VecDeque::new(),
            state: ConnectionState::Connecting,
        }
    }

    /// Returns the path being polled.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<DashboardFrame> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(frame) => {
                    self.last_error = None;
                    Some(frame)
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "invalid dashboard file");
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Message> {
        if let Some(message) = self.pending.pop_front() {
            return Some(message);
        }

        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // Never read, or the file was missing
            (Some(_), None) => false, // File disappeared, keep last values
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            // Each version is read once, even if it fails to parse
            self.last_modified = current_modified;
            if let Some(frame) = self.read_file() {
                debug!(path = %self.path.display(), events = frame.events.len(), "read frame");
                self.state = ConnectionState::Connected;
                self.pending.push_back(Message::Stats(frame.stats));
                self.pending.push_back(Message::Events(frame.events));
                return self.pending.pop_front();
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn state(&self) -> ConnectionState {
        self.state.clone()
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "stats": { "yawns_total": 3, "eye_closures_total": 1, "alerts_total": 0 },
            "events": ["Yawn confirmed", "Prolonged eye closure"]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/dashboard.json");
        assert_eq!(source.path(), Path::new("/tmp/dashboard.json"));
        assert_eq!(source.description(), "file: /tmp/dashboard.json");
        assert!(source.error().is_none());
        assert_eq!(source.state(), ConnectionState::Connecting);
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        // One read yields stats then events
        let first = source.poll();
        assert!(matches!(first, Some(Message::Stats(s)) if s.yawns_total == 3));
        let second = source.poll();
        assert!(matches!(second, Some(Message::Events(ref e)) if e.len() == 2));
        assert_eq!(source.state(), ConnectionState::Connected);

        // No change on disk, nothing more
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_events_defaults_empty() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"stats": {{"yawns_total": 0, "eye_closures_total": 0, "alerts_total": 0}}}}"#
        )
        .unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());
        assert_eq!(source.poll(), Some(Message::Events(Vec::new())));
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/dashboard.json");

        assert!(source.poll().is_none());
        let err = source.error().expect("read error recorded");
        assert!(err.contains("Read error"));
        assert_eq!(source.state(), ConnectionState::Connecting);
    }

    #[test]
    fn test_file_source_invalid_version_read_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();
        file.flush().unwrap();
        let bad_mtime = fs::metadata(file.path()).unwrap().modified().unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));

        // Valid contents behind the same mtime are not re-read
        fs::write(file.path(), sample_json()).unwrap();
        let handle = fs::OpenOptions::new().write(true).open(file.path()).unwrap();
        handle.set_modified(bad_mtime).unwrap();
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));

        // A newer version is picked up
        handle
            .set_modified(bad_mtime + std::time::Duration::from_secs(5))
            .unwrap();
        assert!(matches!(source.poll(), Some(Message::Stats(s)) if s.yawns_total == 3));
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        let err = source.error().expect("parse error recorded");
        assert!(err.contains("Parse error"));
    }
}
