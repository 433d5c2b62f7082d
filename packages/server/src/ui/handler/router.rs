//! 受信メッセージのルーティング
//!
//! 受信フレームをデコードし、`type` に応じて各ユースケースへ振り分けます。
//! デコード失敗・未知の type はどちらも `error` フレームで応答し、接続は維持します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MessageRouter::dispatch() / handle() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：start_listening / stop_listening / subtitle_update / ping
//! - 異常系：不正な JSON、type なし、未知の type、不正なペイロード
//! - エッジケース：未来のタイムスタンプを持つ ping（latency は 0）

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    domain::{SessionId, SessionRepository, Timestamp},
    infrastructure::dto::websocket::{
        ErrorMessage, ListeningStartedMessage, ListeningStoppedMessage, MessageType, PingPayload,
        PongMessage, StartListeningPayload, subtitle_broadcast,
    },
    usecase::{
        BroadcastSubtitleUseCase, ListeningError, StartListeningUseCase, StopListeningUseCase,
    },
};

use super::delivery::{deliver, encode};

/// Errors answered to the client with an `error` frame.
///
/// The `Display` output is the `message` field of that frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Frame is not a JSON object with a string `type`, or its payload does
    /// not match the declared type
    #[error("Invalid message format")]
    InvalidFormat,

    #[error("Unknown message type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    Listening(#[from] ListeningError),
}

/// Frame sent back to the session that sent the inbound message
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    ListeningStarted(ListeningStartedMessage),
    ListeningStopped(ListeningStoppedMessage),
    Pong(PongMessage),
    Error(ErrorMessage),
}

/// Message Router
pub struct MessageRouter {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl MessageRouter {
    /// 新しい MessageRouter を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// フレームを処理し、必要なら送信元セッションへ応答する
    pub async fn handle(&self, session_id: &SessionId, text: &str) {
        match self.dispatch(session_id, text).await {
            Ok(Some(reply)) => self.reply(session_id, &reply).await,
            Ok(None) => {}
            Err(e) => self.reject(session_id, e).await,
        }
    }

    /// 送信元セッションへ `error` フレームを返す
    pub async fn reject(&self, session_id: &SessionId, error: RouteError) {
        tracing::warn!("Rejected message from '{}': {}", session_id, error);
        let reply = Reply::Error(ErrorMessage::new(error.to_string()));
        self.reply(session_id, &reply).await;
    }

    async fn reply(&self, session_id: &SessionId, reply: &Reply) {
        let Some(frame) = encode(reply) else {
            return;
        };
        if let Err(e) = self.repository.send_to(session_id, frame).await {
            tracing::warn!("Failed to reply to '{}': {}", session_id, e);
        }
    }

    /// フレームをデコードして振り分ける
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Reply))` - 送信元へ返す応答
    /// * `Ok(None)` - 応答なし（subtitle_update）
    /// * `Err(RouteError)` - `error` フレームとして返すエラー
    pub async fn dispatch(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<Option<Reply>, RouteError> {
        let (message_type, payload) = decode(text)?;

        match message_type {
            MessageType::StartListening => {
                let request: StartListeningPayload = from_payload(payload)?;
                let session = StartListeningUseCase::new(self.repository.clone())
                    .execute(session_id, request.language.as_deref())
                    .await?;
                Ok(Some(Reply::ListeningStarted(ListeningStartedMessage {
                    r#type: MessageType::ListeningStarted,
                    timestamp: session.started_at.value(),
                    language: session.language.as_str().to_string(),
                })))
            }
            MessageType::StopListening => {
                StopListeningUseCase::new(self.repository.clone())
                    .execute(session_id)
                    .await?;
                Ok(Some(Reply::ListeningStopped(ListeningStoppedMessage {
                    r#type: MessageType::ListeningStopped,
                    timestamp: Timestamp::now().value(),
                })))
            }
            MessageType::SubtitleUpdate => {
                self.broadcast(session_id, payload).await;
                Ok(None)
            }
            MessageType::Ping => {
                let ping: PingPayload = from_payload(payload)?;
                let now = Timestamp::now().value();
                let latency = (now as f64 - ping.timestamp).max(0.0).round() as i64;
                Ok(Some(Reply::Pong(PongMessage {
                    r#type: MessageType::Pong,
                    timestamp: now,
                    latency,
                })))
            }
            // server -> client types are not valid inbound
            other => Err(RouteError::UnknownType(other.as_str().to_string())),
        }
    }

    /// Forward a `subtitle_update` to the other active sessions
    async fn broadcast(&self, session_id: &SessionId, payload: Map<String, Value>) {
        let targets = BroadcastSubtitleUseCase::new(self.repository.clone())
            .execute(session_id)
            .await;
        if targets.is_empty() {
            return;
        }

        let frame = subtitle_broadcast(payload, Timestamp::now().value(), session_id.as_str());
        let report = deliver(&targets, &Value::Object(frame).to_string());
        tracing::debug!(
            "Broadcasted subtitle from '{}' to {} session(s) ({} failed)",
            session_id,
            report.delivered,
            report.failed
        );
    }
}

/// Parse a frame into its declared type and the full JSON object.
fn decode(text: &str) -> Result<(MessageType, Map<String, Value>), RouteError> {
    let Ok(Value::Object(payload)) = serde_json::from_str::<Value>(text) else {
        return Err(RouteError::InvalidFormat);
    };
    let type_name = match payload.get("type") {
        Some(Value::String(name)) => name.clone(),
        _ => return Err(RouteError::InvalidFormat),
    };
    let message_type = serde_json::from_value::<MessageType>(Value::String(type_name.clone()))
        .map_err(|_| RouteError::UnknownType(type_name))?;
    Ok((message_type, payload))
}

fn from_payload<T: serde::de::DeserializeOwned>(
    payload: Map<String, Value>,
) -> Result<T, RouteError> {
    serde_json::from_value(Value::Object(payload)).map_err(|_| RouteError::InvalidFormat)
}
