//! Client configuration (command line and environment).

use std::time::Duration;

use clap::Parser;

use crate::retry::RetryPolicy;

/// Terminal caption client
#[derive(Debug, Clone, Parser)]
#[command(name = "jimaku-client", version, about)]
pub struct ClientConfig {
    /// WebSocket endpoint of the relay
    #[arg(long, env = "JIMAKU_URL", default_value = "ws://127.0.0.1:8080/ws")]
    pub url: String,

    /// Language declared with start_listening
    #[arg(short, long, default_value = "en-US")]
    pub language: String,

    /// Give up after this many failed reconnects (retry forever if omitted)
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Delay before the first reconnect
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Upper bound on the reconnect delay
    #[arg(long, default_value_t = 30_000)]
    pub max_retry_delay_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ClientConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries,
            initial_delay: Duration::from_millis(self.retry_delay_ms),
            max_delay: Duration::from_millis(self.max_retry_delay_ms),
            ..RetryPolicy::default()
        }
    }
}
