//! Tracing subscriber setup for the binary.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Log level for a `-v` count; `0` keeps the configured level.
pub fn level_for(config: &Config, verbosity: u8) -> &str {
    match verbosity {
        0 => &config.log_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build an `EnvFilter` from the given level, respecting the `RUST_LOG` env var.
///
/// Dependencies (HTTP stack) stay at `warn` unless `RUST_LOG` says otherwise.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,mushaf={level},mushaf_std={level},mushaf_core={level}"
        ))
    })
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// the rendered page on stdout.
pub fn init(config: &Config, verbosity: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = env_filter(level_for(config, verbosity));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
}
