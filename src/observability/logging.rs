//! # Logging
//!
//! `tracing-subscriber` setup for the CLI.
//!
//! `RUST_LOG` wins when set. Otherwise the configured `log_level` is applied to
//! this crate and the binary, and everything else stays at `warn`.

use crate::config::ControllerConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter used when `RUST_LOG` is not set
fn default_filter(config: &ControllerConfig) -> String {
    let level = config.log_level.to_lowercase();
    match level.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => {
            format!("warn,securekey_controller={level},securekeyctl={level}")
        }
        _ => crate::constants::DEFAULT_LOG_FILTER.to_string(),
    }
}

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed (tests, embedding).
pub fn init_logging(config: &ControllerConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
