//! Terminal caption client for the Jimaku relay.
//!
//! Lines typed at the prompt are sent as captions; captions from other
//! sessions are printed as they arrive. The connection is re-established
//! according to a [`RetryPolicy`](retry::RetryPolicy).

pub mod config;
pub mod display;
pub mod error;
pub mod protocol;
pub mod retry;
pub mod session;

pub use config::ClientConfig;
pub use session::run_client;
