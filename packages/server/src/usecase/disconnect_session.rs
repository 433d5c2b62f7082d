//! UseCase: セッション切断処理
//!
//! close とトランスポートエラーはどちらもこのユースケースに行き着きます。
//! 同じセッションに対して複数回呼ばれても問題ありません。

use std::sync::Arc;

use crate::domain::{SessionId, SessionRepository};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// セッション切断を実行
    ///
    /// # Returns
    ///
    /// 実際に削除した場合は `true`、既に削除済みなら `false`
    pub async fn execute(&self, session_id: &SessionId) -> bool {
        let removed = self.repository.remove(session_id).await;
        if removed {
            tracing::info!("Session '{}' removed", session_id);
        } else {
            tracing::debug!("Session '{}' was already removed", session_id);
        }
        removed
    }

    /// 残りのセッション数を取得
    pub async fn count_remaining_sessions(&self) -> usize {
        self.repository.count().await
    }
}
