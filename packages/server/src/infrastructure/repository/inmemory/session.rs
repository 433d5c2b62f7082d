//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! セッションと送信チャンネルは同じエントリに格納されるため、
//! ID と生きているチャンネルは常に 1 対 1 に対応します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    OutboundSender, Recipient, RepositoryError, Session, SessionId, SessionIdFactory,
    SessionMutator, SessionRepository, Timestamp,
};

/// Stored entry: the domain snapshot plus the live outbound channel
struct SessionEntry {
    session: Session,
    sender: OutboundSender,
}

/// インメモリ Session Repository 実装
///
/// HashMap をインメモリ DB として使用する実装。
/// ドメイン層の SessionRepository trait を実装します（依存性の逆転）。
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    /// 接続中のセッション（WebSocket sender を含む）
    sessions: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
}

impl InMemorySessionRepository {
    /// 新しい空の InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, sender: OutboundSender) -> Result<Session, RepositoryError> {
        let mut sessions = self.sessions.lock().await;

        // 既存の ID と衝突した場合は再生成する
        let id = loop {
            let candidate = SessionIdFactory::generate()?;
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        let session = Session::new(id.clone(), Timestamp::now());
        sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                sender,
            },
        );
        Ok(session)
    }

    async fn get(&self, id: &SessionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(id).map(|entry| entry.session.clone())
    }

    async fn update(
        &self,
        id: &SessionId,
        mutator: SessionMutator,
    ) -> Result<Session, RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.to_string()))?;
        mutator(&mut entry.session);
        Ok(entry.session.clone())
    }

    async fn remove(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(id).is_some()
    }

    async fn list_all(&self) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        let mut list: Vec<Session> = sessions
            .values()
            .map(|entry| entry.session.clone())
            .collect();
        list.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }

    async fn send_to(&self, id: &SessionId, frame: String) -> Result<(), RepositoryError> {
        let sessions = self.sessions.lock().await;
        let entry = sessions
            .get(id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.to_string()))?;
        entry
            .sender
            .send(frame)
            .map_err(|_| RepositoryError::ChannelClosed(id.to_string()))
    }

    async fn active_recipients(&self, exclude: &SessionId) -> Vec<Recipient> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|(id, entry)| *id != exclude && entry.session.is_active)
            .map(|(id, entry)| Recipient {
                id: id.clone(),
                sender: entry.sender.clone(),
            })
            .collect()
    }

    async fn clear(&self) -> Vec<Recipient> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .drain()
            .map(|(id, entry)| Recipient {
                id,
                sender: entry.sender,
            })
            .collect()
    }
}
