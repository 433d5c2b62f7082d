//! WebSocket message DTOs for the caption relay.
//!
//! Every frame is a JSON object with a `type` field. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    // client -> server
    StartListening,
    StopListening,
    SubtitleUpdate,
    Ping,
    // server -> client
    SessionInit,
    ListeningStarted,
    ListeningStopped,
    Pong,
    Error,
    ServerShutdown,
}

impl MessageType {
    /// Wire name of the type (the value of the `type` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartListening => "start_listening",
            Self::StopListening => "stop_listening",
            Self::SubtitleUpdate => "subtitle_update",
            Self::Ping => "ping",
            Self::SessionInit => "session_init",
            Self::ListeningStarted => "listening_started",
            Self::ListeningStopped => "listening_stopped",
            Self::Pong => "pong",
            Self::Error => "error",
            Self::ServerShutdown => "server_shutdown",
        }
    }
}

/// Payload of `start_listening`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartListeningPayload {
    #[serde(default)]
    pub language: Option<String>,
}

/// Payload of `ping`. Browsers may send fractional milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingPayload {
    pub timestamp: f64,
}

/// Sent once to every new connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInitMessage {
    pub r#type: MessageType,
    pub session_id: String,
    pub timestamp: i64,
}

/// Reply to `start_listening`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningStartedMessage {
    pub r#type: MessageType,
    pub timestamp: i64,
    pub language: String,
}

/// Reply to `stop_listening`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningStoppedMessage {
    pub r#type: MessageType,
    pub timestamp: i64,
}

/// Reply to `ping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PongMessage {
    pub r#type: MessageType,
    pub timestamp: i64,
    /// Milliseconds between the client's ping timestamp and the server clock
    pub latency: i64,
}

/// Recoverable protocol error; the connection stays open
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}

/// Sent to every session right before the server exits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerShutdownMessage {
    pub r#type: MessageType,
    pub message: String,
}

/// Build the fan-out frame: the original `subtitle_update` fields plus
/// `serverTimestamp` and `sessionId`. Server fields overwrite client fields
/// of the same name.
pub fn subtitle_broadcast(
    mut payload: Map<String, Value>,
    server_timestamp: i64,
    session_id: &str,
) -> Map<String, Value> {
    payload.insert("serverTimestamp".to_string(), Value::from(server_timestamp));
    payload.insert("sessionId".to_string(), Value::from(session_id));
    payload
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::Error,
            message: message.into(),
        }
    }
}

impl ServerShutdownMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::ServerShutdown,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_type_wire_names() {
        // テスト項目: MessageType のシリアライズ結果が as_str と一致する
        // given (前提条件):
        let all = [
            MessageType::StartListening,
            MessageType::StopListening,
            MessageType::SubtitleUpdate,
            MessageType::Ping,
            MessageType::SessionInit,
            MessageType::ListeningStarted,
            MessageType::ListeningStopped,
            MessageType::Pong,
            MessageType::Error,
            MessageType::ServerShutdown,
        ];

        // then (期待する結果):
        for ty in all {
            assert_eq!(serde_json::to_value(ty).unwrap(), json!(ty.as_str()));
        }
    }

    #[test]
    fn test_session_init_uses_camel_case() {
        // テスト項目: session_init のフィールド名が camelCase になる
        // given (前提条件):
        let msg = SessionInitMessage {
            r#type: MessageType::SessionInit,
            session_id: "abc".to_string(),
            timestamp: 1000,
        };

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "session_init", "sessionId": "abc", "timestamp": 1000})
        );
    }

    #[test]
    fn test_start_listening_payload_language_optional() {
        // テスト項目: start_listening の language は省略できる
        // when (操作):
        let payload: StartListeningPayload =
            serde_json::from_value(json!({"type": "start_listening"})).unwrap();

        // then (期待する結果):
        assert!(payload.language.is_none());
    }

    #[test]
    fn test_subtitle_broadcast_adds_server_fields() {
        // テスト項目: 元のフィールドを保持したまま serverTimestamp と sessionId が付与される
        // given (前提条件):
        let payload = json!({"type": "subtitle_update", "text": "bonjour", "isFinal": true});
        let Value::Object(map) = payload else {
            unreachable!()
        };

        // when (操作):
        let frame = subtitle_broadcast(map, 1234, "A");

        // then (期待する結果):
        assert_eq!(
            Value::Object(frame),
            json!({
                "type": "subtitle_update",
                "text": "bonjour",
                "isFinal": true,
                "serverTimestamp": 1234,
                "sessionId": "A"
            })
        );
    }
}
