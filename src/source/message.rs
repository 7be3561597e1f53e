//! Wire format for pushed messages.
//!
//! Every message is a JSON envelope naming the event and carrying its payload:
//!
//! ```text
//! {"event": "stats",  "data": {"yawns_total": 3, "eye_closures_total": 1, "alerts_total": 0}}
//! {"event": "events", "data": ["Yawn confirmed", "Prolonged eye closure"]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::StatsSnapshot;
use crate::error::ProtocolError;

/// Event name carrying a [`StatsSnapshot`].
pub const STATS_EVENT: &str = "stats";
/// Event name carrying the recent event list.
pub const EVENTS_EVENT: &str = "events";

/// A decoded message from the push stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Cumulative counters.
    Stats(StatsSnapshot),
    /// Recent events, oldest first.
    Events(Vec<String>),
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

impl Message {
    /// Decode a message from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_slice(bytes)?;
        Self::from_envelope(envelope)
    }

    /// Decode a message from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        Self::from_envelope(envelope)
    }

    fn from_envelope(envelope: Envelope) -> Result<Self, ProtocolError> {
        match envelope.event.as_str() {
            STATS_EVENT => serde_json::from_value(envelope.data)
                .map(Message::Stats)
                .map_err(|source| ProtocolError::InvalidPayload {
                    event: STATS_EVENT,
                    source,
                }),
            EVENTS_EVENT => serde_json::from_value(envelope.data)
                .map(Message::Events)
                .map_err(|source| ProtocolError::InvalidPayload {
                    event: EVENTS_EVENT,
                    source,
                }),
            other => Err(ProtocolError::UnknownEvent(other.to_string())),
        }
    }

    /// The event name this message travels under.
    pub fn event_name(&self) -> &'static str {
        match self {
            Message::Stats(_) => STATS_EVENT,
            Message::Events(_) => EVENTS_EVENT,
        }
    }

    /// Encode as a single-line JSON envelope.
    pub fn to_json(&self) -> String {
        let data = match self {
            Message::Stats(stats) => serde_json::json!(stats),
            Message::Events(entries) => serde_json::json!(entries),
        };
        serde_json::json!({ "event": self.event_name(), "data": data }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stats() {
        let json = r#"{"event":"stats","data":{"yawns_total":3,"eye_closures_total":1,"alerts_total":0}}"#;
        let message = Message::from_json(json).unwrap();
        assert_eq!(
            message,
            Message::Stats(StatsSnapshot {
                yawns_total: 3,
                eye_closures_total: 1,
                alerts_total: 0,
            })
        );
    }

    #[test]
    fn test_decode_events() {
        let json = r#"{"event":"events","data":["a","b","c"]}"#;
        let message = Message::from_slice(json.as_bytes()).unwrap();
        assert_eq!(
            message,
            Message::Events(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_decode_empty_events() {
        let message = Message::from_json(r#"{"event":"events","data":[]}"#).unwrap();
        assert_eq!(message, Message::Events(Vec::new()));
    }

    #[test]
    fn test_stats_missing_field_rejected() {
        let json = r#"{"event":"stats","data":{"yawns_total":3,"alerts_total":0}}"#;
        let err = Message::from_json(json).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPayload { event: "stats", .. }));
    }

    #[test]
    fn test_stats_non_numeric_rejected() {
        let json = r#"{"event":"stats","data":{"yawns_total":"3","eye_closures_total":1,"alerts_total":0}}"#;
        assert!(Message::from_json(json).is_err());

        let json = r#"{"event":"stats","data":{"yawns_total":-1,"eye_closures_total":1,"alerts_total":0}}"#;
        assert!(Message::from_json(json).is_err());

        let json = r#"{"event":"stats","data":{"yawns_total":1.5,"eye_closures_total":1,"alerts_total":0}}"#;
        assert!(Message::from_json(json).is_err());
    }

    #[test]
    fn test_events_wrong_shape_rejected() {
        let json = r#"{"event":"events","data":[1,2,3]}"#;
        let err = Message::from_json(json).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidPayload { event: "events", .. }));
        assert!(err.to_string().starts_with("Invalid events payload"));
    }

    #[test]
    fn test_unknown_event_rejected() {
        let err = Message::from_json(r#"{"event":"frame","data":{}}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownEvent(ref name) if name == "frame"));
    }

    #[test]
    fn test_not_json_rejected() {
        let err = Message::from_json("not valid json").unwrap_err();
        assert!(matches!(err, ProtocolError::Json(_)));
    }

    #[test]
    fn test_to_json_decodes_back() {
        let message = Message::Events(vec!["Yawn confirmed".to_string()]);
        assert_eq!(Message::from_json(&message.to_json()).unwrap(), message);
    }
}
