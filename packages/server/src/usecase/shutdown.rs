//! UseCase: サーバー停止処理
//!
//! 全セッションを Repository から一括で取り出します。
//! 呼び出し側は返された配信先へ `server_shutdown` を送ってから破棄します。
//! 破棄された時点でチャンネルが閉じ、各接続の送信タスクが Close フレームを送ります。

use std::sync::Arc;

use crate::domain::{Recipient, SessionRepository};

/// サーバー停止のユースケース
pub struct ShutdownUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl ShutdownUseCase {
    /// 新しい ShutdownUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 全セッションを削除し、その配信先を返す
    pub async fn execute(&self) -> Vec<Recipient> {
        let recipients = self.repository.clear().await;
        tracing::info!("Closing {} session(s)", recipients.len());
        recipients
    }
}
