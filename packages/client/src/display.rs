//! Rendering of server frames for the terminal.

use jimaku_server::infrastructure::dto::websocket::MessageType;
use serde_json::Value;

/// One printable line for a server frame, or `None` for frames not meant for display.
pub fn format_event(event: &Value) -> Option<String> {
    let message_type: MessageType = serde_json::from_value(event.get("type")?.clone()).ok()?;

    let line = match message_type {
        MessageType::SessionInit => format!("* connected as {}", event["sessionId"].as_str()?),
        MessageType::ListeningStarted => format!(
            "* listening ({})",
            event["language"].as_str().unwrap_or("unknown")
        ),
        MessageType::ListeningStopped => "* stopped listening".to_string(),
        MessageType::SubtitleUpdate => {
            let speaker = event["sessionId"].as_str().unwrap_or("?");
            format!("[{}] {}", speaker, event["text"].as_str()?)
        }
        MessageType::Pong => format!("* pong: {} ms", event["latency"].as_i64()?),
        MessageType::Error => format!(
            "! {}",
            event["message"].as_str().unwrap_or("unknown error")
        ),
        MessageType::ServerShutdown => format!(
            "* {}",
            event["message"].as_str().unwrap_or("server shutting down")
        ),
        MessageType::StartListening | MessageType::StopListening | MessageType::Ping => {
            return None;
        }
    };
    Some(line)
}

/// Whether the frame announces that the server is going away
pub fn is_shutdown(event: &Value) -> bool {
    event["type"] == MessageType::ServerShutdown.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_caption() {
        // テスト項目: 字幕は話者の sessionId 付きで表示される
        // given (前提条件):
        let event = json!({
            "type": "subtitle_update",
            "text": "bonjour",
            "sessionId": "abc",
            "serverTimestamp": 1
        });

        // then (期待する結果):
        assert_eq!(format_event(&event).as_deref(), Some("[abc] bonjour"));
    }

    #[test]
    fn test_format_control_messages() {
        // テスト項目: 制御メッセージが表示用の文字列になる
        // then (期待する結果):
        assert_eq!(
            format_event(&json!({"type": "session_init", "sessionId": "x", "timestamp": 1}))
                .as_deref(),
            Some("* connected as x")
        );
        assert_eq!(
            format_event(&json!({"type": "pong", "timestamp": 1, "latency": 12})).as_deref(),
            Some("* pong: 12 ms")
        );
        assert_eq!(
            format_event(&json!({"type": "error", "message": "Unknown message type: foo"}))
                .as_deref(),
            Some("! Unknown message type: foo")
        );
    }

    #[test]
    fn test_format_ignores_unknown_and_malformed() {
        // テスト項目: 未知の type や必要なフィールドのないフレームは表示しない
        // then (期待する結果):
        assert_eq!(format_event(&json!({"type": "mystery"})), None);
        assert_eq!(format_event(&json!({"type": "subtitle_update"})), None);
        assert_eq!(format_event(&json!([1, 2, 3])), None);
    }

    #[test]
    fn test_is_shutdown() {
        // テスト項目: server_shutdown を判別できる
        // then (期待する結果):
        assert!(is_shutdown(&json!({"type": "server_shutdown", "message": "bye"})));
        assert!(!is_shutdown(&json!({"type": "pong"})));
    }
}
