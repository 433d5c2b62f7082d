//! UseCase: 文字起こし停止処理

use std::sync::Arc;

use crate::domain::{Session, SessionId, SessionRepository};

use super::error::ListeningError;

/// 文字起こし停止のユースケース
pub struct StopListeningUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl StopListeningUseCase {
    /// 新しい StopListeningUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// セッションを非アクティブにする。非アクティブなセッションに対しても成功する
    pub async fn execute(&self, session_id: &SessionId) -> Result<Session, ListeningError> {
        let session = self
            .repository
            .update(
                session_id,
                Box::new(|session: &mut Session| session.stop_listening()),
            )
            .await?;

        tracing::info!("Session '{}' stopped listening", session.id);
        Ok(session)
    }
}
