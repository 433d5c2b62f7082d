//! UseCase: 文字起こし開始処理

use std::sync::Arc;

use crate::domain::{LanguageTag, Session, SessionId, SessionRepository, Timestamp};

use super::error::ListeningError;

/// 文字起こし開始のユースケース
pub struct StartListeningUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl StartListeningUseCase {
    /// 新しい StartListeningUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// セッションをアクティブにする
    ///
    /// # Arguments
    ///
    /// * `session_id` - 対象セッション
    /// * `language` - クライアントが指定した言語（未指定・空文字は既定値）
    ///
    /// # Returns
    ///
    /// 更新後のセッション。言語タグが不正な場合はセッションを変更せずにエラーを返す
    pub async fn execute(
        &self,
        session_id: &SessionId,
        language: Option<&str>,
    ) -> Result<Session, ListeningError> {
        let language = LanguageTag::resolve(language)?;
        let now = Timestamp::now();

        let session = self
            .repository
            .update(
                session_id,
                Box::new(move |session: &mut Session| session.start_listening(language, now)),
            )
            .await?;

        tracing::info!(
            "Session '{}' started listening ({})",
            session.id,
            session.language
        );
        Ok(session)
    }
}
