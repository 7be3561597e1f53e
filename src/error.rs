//! Error types for decoding pushed messages.

use thiserror::Error;

/// Errors that can occur when decoding a message from the push stream.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The message was not a JSON envelope.
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope named an event this client does not handle.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// The event name was known but its payload had the wrong shape.
    #[error("Invalid {event} payload: {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
