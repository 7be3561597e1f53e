//! Stream-based data source.
//!
//! Receives dashboard messages from an async byte stream, one JSON envelope
//! per line. This is the mode used for live TCP connections.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{ConnectionState, DataSource, Message};

/// Buffered messages between the reader task and the UI thread.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
struct Shared {
    state: ConnectionState,
    last_error: Option<String>,
}

impl Shared {
    fn new() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            state: ConnectionState::Connecting,
            last_error: None,
        }))
    }
}

/// Decode one payload, updating the shared state. Returns the message if valid.
fn decode(bytes: &[u8], shared: &Mutex<Shared>) -> Option<Message> {
    match Message::from_slice(bytes) {
        Ok(message) => {
            debug!(event = message.event_name(), "received message");
            let mut shared = shared.lock();
            shared.state = ConnectionState::Connected;
            shared.last_error = None;
            Some(message)
        }
        Err(e) => {
            warn!(error = %e, "dropping malformed message");
            shared.lock().last_error = Some(format!("Parse error: {}", e));
            None
        }
    }
}

/// A data source that receives dashboard messages from an async stream.
///
/// This source spawns a background task that reads newline-delimited JSON
/// envelopes from the provided async reader and makes the decoded messages
/// available via `poll()`, in the order they were read.
///
/// # Example with a byte stream
///
/// ```
/// use std::io::Cursor;
/// use drowsy_dash::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"event\":\"events\",\"data\":[]}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<Message>,
    description: String,
    shared: Arc<Mutex<Shared>>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Blank lines are skipped. Lines that fail to decode are dropped and
    /// recorded as the source's error; reading continues.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let shared = Shared::new();
        let task_shared = shared.clone();
        let desc = description.to_string();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = Vec::new();

            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line).await {
                    Ok(0) => {
                        info!(source = %desc, "stream closed");
                        task_shared.lock().state =
                            ConnectionState::Disconnected("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => {
                        // Raw bytes, so a non-UTF-8 line is a decode error, not a read error
                        let trimmed = line.trim_ascii();
                        if trimmed.is_empty() {
                            continue;
                        }
                        if let Some(message) = decode(trimmed, &task_shared) {
                            if tx.send(message).await.is_err() {
                                // Receiver dropped
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(source = %desc, error = %e, "stream read failed");
                        task_shared.lock().state =
                            ConnectionState::Disconnected(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            shared,
        }
    }

    /// Create a StreamSource from a raw bytes channel.
    ///
    /// Each item is one complete JSON envelope. This is useful when another
    /// transport already frames the messages.
    pub fn from_bytes_channel(mut rx: mpsc::Receiver<Vec<u8>>, description: &str) -> Self {
        let (tx, message_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let shared = Shared::new();
        let task_shared = shared.clone();

        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                if let Some(message) = decode(&bytes, &task_shared) {
                    if tx.send(message).await.is_err() {
                        return;
                    }
                }
            }
            task_shared.lock().state =
                ConnectionState::Disconnected("Channel closed".to_string());
        });

        Self {
            receiver: message_rx,
            description: format!("stream: {}", description),
            shared,
        }
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<Message> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                let mut shared = self.shared.lock();
                if !shared.state.is_disconnected() {
                    shared.state = ConnectionState::Disconnected("Stream ended".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn state(&self) -> ConnectionState {
        self.shared.lock().state.clone()
    }

    fn error(&self) -> Option<String> {
        self.shared.lock().last_error.clone()
    }
}
