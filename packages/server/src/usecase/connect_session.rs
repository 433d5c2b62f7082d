//! UseCase: セッション接続処理
//!
//! 新しい接続に対してセッションを作成します。
//! `session_init` の送信は UI 層が行います。

use std::sync::Arc;

use crate::domain::{OutboundSender, Session, SessionRepository};

use super::error::ConnectError;

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - このセッション宛てのメッセージ送信チャンネル（所有権は Repository に移る）
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 作成されたセッション（非アクティブ・既定言語）
    /// * `Err(ConnectError)` - 作成に失敗
    pub async fn execute(&self, sender: OutboundSender) -> Result<Session, ConnectError> {
        let session = self.repository.create(sender).await?;
        tracing::info!("Session '{}' created", session.id);
        Ok(session)
    }
}
