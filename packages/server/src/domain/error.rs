//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// SessionId validation error
    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    /// SessionId too long error
    #[error("SessionId cannot exceed {max} characters (got {actual})")]
    SessionIdTooLong { max: usize, actual: usize },

    /// LanguageTag validation error
    #[error("Language tag cannot be empty")]
    LanguageTagEmpty,

    /// LanguageTag too long error
    #[error("Language tag cannot exceed {max} characters (got {actual})")]
    LanguageTagTooLong { max: usize, actual: usize },

    /// LanguageTag contains characters outside `[A-Za-z0-9-]`
    #[error("Invalid language tag: {0}")]
    LanguageTagInvalidFormat(String),
}

/// Errors returned by a [`SessionRepository`](super::SessionRepository)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No session is registered under the given id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The session exists but its outbound channel has been closed
    #[error("Outbound channel closed for session: {0}")]
    ChannelClosed(String),

    /// A fresh session id could not be produced
    #[error("Failed to generate session id: {0}")]
    IdGeneration(#[from] ValueObjectError),
}
