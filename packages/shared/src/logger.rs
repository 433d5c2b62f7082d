//! Tracing subscriber setup shared by the server and client binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise the binary's own crate, the Jimaku
/// library crates and `tower_http` log at `default_level`, everything else at
/// `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    // try_init so that tests calling this more than once do not panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let bin_target = bin_name.replace('-', "_");
    format!(
        "warn,{bin_target}={default_level},jimaku_server={default_level},jimaku_client={default_level},tower_http={default_level}"
    )
}
