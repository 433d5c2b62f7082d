//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// Errors raised while accepting a new connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors raised by `start_listening` / `stop_listening`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListeningError {
    /// The requested language tag failed validation
    #[error("{0}")]
    InvalidLanguage(#[from] ValueObjectError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
