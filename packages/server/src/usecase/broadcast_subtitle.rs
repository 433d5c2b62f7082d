//! UseCase: 字幕ブロードキャスト処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastSubtitleUseCase::execute() メソッド
//! - ブロードキャスト対象の選定（送信者以外のアクティブなセッション）
//!
//! ### なぜこのテストが必要か
//! - 送信者自身と非アクティブなセッションが対象に含まれないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数のアクティブな視聴者
//! - エッジケース：存在しない送信者（対象なし）、送信者しかいない場合

use std::sync::Arc;

use crate::domain::{Recipient, SessionId, SessionRepository};

/// 字幕ブロードキャストのユースケース
pub struct BroadcastSubtitleUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl BroadcastSubtitleUseCase {
    /// 新しい BroadcastSubtitleUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// ブロードキャスト対象を選定
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 字幕を送信したセッション
    ///
    /// # Returns
    ///
    /// 送信者以外のアクティブなセッションの配信先。
    /// 送信者が存在しない場合は空
    pub async fn execute(&self, sender_id: &SessionId) -> Vec<Recipient> {
        if self.repository.get(sender_id).await.is_none() {
            tracing::debug!("Ignoring broadcast from unknown session '{}'", sender_id);
            return Vec::new();
        }
        self.repository.active_recipients(sender_id).await
    }
}
