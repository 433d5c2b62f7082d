//! Handler modules for HTTP and WebSocket endpoints.

pub mod delivery;
pub mod http;
mod router;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{health_check, list_sessions};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
