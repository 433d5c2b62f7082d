//! Server state shared by every handler.

use std::{sync::Arc, time::Instant};

use tokio_util::sync::CancellationToken;

use crate::domain::SessionRepository;

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn SessionRepository>,
    /// When the server started, for the health uptime
    pub started_at: Instant,
    /// Cancelled once shutdown begins; new upgrades are refused from then on
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            started_at: Instant::now(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Mark the server as shutting down
    pub fn begin_shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Whether shutdown has begun
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
