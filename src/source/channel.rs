//! Channel-based data source.
//!
//! Receives already-decoded messages through a tokio mpsc channel. This is
//! useful when the dashboard is embedded next to the producer, or when a
//! bridge from another transport has done the decoding itself.

use tokio::sync::mpsc;

use super::{ConnectionState, DataSource, Message};

/// A data source that receives dashboard messages via a channel.
///
/// Unlike a watch channel, every message is kept so that `stats` and
/// `events` pushed back to back are both delivered, in order.
///
/// # Example
///
/// ```
/// use drowsy_dash::{ChannelSource, Message};
///
/// let (tx, source) = ChannelSource::create("in-process");
/// tx.send(Message::Events(vec!["Yawn confirmed".to_string()])).unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<Message>,
    description: String,
    state: ConnectionState,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of an unbounded mpsc channel
    /// * `source_description` - Where the messages come from
    ///   (e.g., "in-process", "replay://session.ndjson")
    pub fn new(receiver: mpsc::UnboundedReceiver<Message>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            state: ConnectionState::Connecting,
        }
    }

    /// Create a channel pair for pushing messages to a ChannelSource.
    ///
    /// Dropping every sender marks the source as disconnected once the
    /// queued messages have been drained.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<Message>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Message> {
        match self.receiver.try_recv() {
            Ok(message) => {
                self.state = ConnectionState::Connected;
                Some(message)
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if !self.state.is_disconnected() {
                    self.state = ConnectionState::Disconnected("Sender dropped".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn state(&self) -> ConnectionState {
        self.state.clone()
    }

    fn error(&self) -> Option<String> {
        // Messages arrive already decoded
        None
    }
}
