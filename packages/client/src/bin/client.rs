//! Terminal caption client.
//!
//! Type a line to broadcast it as a caption. Commands: `/start [lang]`,
//! `/stop`, `/ping`, `/quit`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin jimaku-client -- --url ws://127.0.0.1:8080/ws --language ja-JP
//! ```

use clap::Parser;
use jimaku_client::ClientConfig;
use jimaku_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ClientConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = jimaku_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
