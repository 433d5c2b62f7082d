//! Core domain models for the caption relay.

use super::value_object::{LanguageTag, SessionId, Timestamp};

/// Server-side record of one connected client's transcription state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session identifier
    pub id: SessionId,
    /// Timestamp when the connection was accepted
    pub connected_at: Timestamp,
    /// Timestamp of the latest `start_listening` (connection time until then)
    pub started_at: Timestamp,
    /// Declared speech language
    pub language: LanguageTag,
    /// Whether the client is currently transcribing
    pub is_active: bool,
}

impl Session {
    /// Create a new inactive session with the default language
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            started_at: connected_at,
            language: LanguageTag::default(),
            is_active: false,
        }
    }

    /// Mark the session active, apply the language and reset the start time.
    ///
    /// Calling this on an already active session re-applies both values.
    pub fn start_listening(&mut self, language: LanguageTag, now: Timestamp) {
        self.is_active = true;
        self.language = language;
        self.started_at = now;
    }

    /// Mark the session inactive
    pub fn stop_listening(&mut self) {
        self.is_active = false;
    }

    /// Milliseconds since `started_at`
    pub fn uptime_millis(&self, now: Timestamp) -> i64 {
        self.started_at.elapsed_until(now)
    }
}
