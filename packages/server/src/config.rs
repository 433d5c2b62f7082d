//! Server configuration (command line and environment).

use std::time::Duration;

use clap::Parser;

/// Live caption relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "jimaku-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "JIMAKU_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 picks a free port)
    #[arg(short, long, env = "JIMAKU_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "JIMAKU_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Milliseconds to let sockets flush `server_shutdown` before exiting
    #[arg(long, env = "JIMAKU_SHUTDOWN_GRACE_MS", default_value_t = 500)]
    pub shutdown_grace_ms: u64,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
