//! Client error definitions.

use thiserror::Error;

/// Errors surfaced by the caption client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Gave up after {attempts} connection attempts")]
    RetriesExhausted { attempts: u32 },
}
