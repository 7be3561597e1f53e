//! Data source abstraction for receiving pushed dashboard messages.
//!
//! This module provides a trait-based abstraction for receiving `stats` and
//! `events` messages from various sources (network streams, in-process
//! channels, a polled JSON file).

mod channel;
mod file;
mod message;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use message::{Message, EVENTS_EVENT, STATS_EVENT};
pub use stream::StreamSource;

use std::fmt::{self, Debug};

/// Connection status of a source, as surfaced in the header bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Nothing received yet and no failure seen.
    Connecting,
    /// The source is delivering messages.
    Connected,
    /// The source ended; the dashboard keeps its last values.
    Disconnected(String),
}

impl ConnectionState {
    /// Returns true once the source can no longer deliver messages.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, ConnectionState::Disconnected(_))
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Disconnected(reason) => write!(f, "disconnected ({})", reason),
        }
    }
}

/// Trait for receiving dashboard messages from various sources.
///
/// Implementations deliver messages in the order the producer sent them.
///
/// # Example
///
/// ```
/// use drowsy_dash::{DataSource, FileSource};
///
/// let mut source = FileSource::new("dashboard.json");
/// while let Some(message) = source.poll() {
///     println!("Got a {} message", message.event_name());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the next message.
    ///
    /// Returns `Some(message)` if one is waiting, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<Message>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Current connection state.
    fn state(&self) -> ConnectionState;

    /// The most recent decode or read error, if the source is currently failing.
    fn error(&self) -> Option<String>;
}
