//! WebSocket caption relay library.
//!
//! Sessions connect over WebSocket, declare when they are transcribing and
//! push caption updates that are fanned out to every other active session.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{build_router, run as run_server, serve};
