//! WebSocket caption relay server implementation.

mod handler;
mod runner;
mod signal;
pub mod state; // テストから AppState を組み立てるため public

pub use runner::{build_router, run, serve};
pub use signal::shutdown_signal;
