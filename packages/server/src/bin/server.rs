//! Live caption relay server.
//!
//! Relays `subtitle_update` events from one session to every other active session.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin jimaku-server -- --port 8080
//! ```

use clap::Parser;
use jimaku_server::ServerConfig;
use jimaku_shared::logger::setup_logger;

// One logical thread of control for every connection
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = jimaku_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
