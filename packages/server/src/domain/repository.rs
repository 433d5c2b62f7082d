//! Session Repository trait.
//!
//! ドメイン層が定義するセッションストアの抽象。
//! UseCase 層はこの trait に依存し、具体的な実装（InMemory など）には依存しません。

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{Session, SessionId, error::RepositoryError};

/// Outbound channel of one connection. Each item is a serialized JSON frame.
pub type OutboundSender = UnboundedSender<String>;

/// Mutation applied to a stored session by [`SessionRepository::update`]
pub type SessionMutator = Box<dyn FnOnce(&mut Session) + Send>;

/// A session's id paired with its outbound channel, used for fan-out
#[derive(Debug, Clone)]
pub struct Recipient {
    pub id: SessionId,
    pub sender: OutboundSender,
}

/// Single source of truth for "who is connected".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a new session owning `sender` and return its snapshot
    async fn create(&self, sender: OutboundSender) -> Result<Session, RepositoryError>;

    /// Snapshot of a session, if present
    async fn get(&self, id: &SessionId) -> Option<Session>;

    /// Apply `mutator` to a session and return the updated snapshot
    async fn update(
        &self,
        id: &SessionId,
        mutator: SessionMutator,
    ) -> Result<Session, RepositoryError>;

    /// Remove a session and drop its channel.
    ///
    /// Idempotent: returns `false` when the id was not present.
    async fn remove(&self, id: &SessionId) -> bool;

    /// Snapshots of all sessions, ordered by connection time
    async fn list_all(&self) -> Vec<Session>;

    /// Number of live sessions
    async fn count(&self) -> usize;

    /// Push a frame onto one session's outbound channel
    async fn send_to(&self, id: &SessionId, frame: String) -> Result<(), RepositoryError>;

    /// Active sessions other than `exclude`
    async fn active_recipients(&self, exclude: &SessionId) -> Vec<Recipient>;

    /// Remove every session in one step and hand back their channels.
    ///
    /// The channels close once the returned recipients are dropped.
    async fn clear(&self) -> Vec<Recipient>;
}
