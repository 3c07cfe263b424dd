//! Logging setup for the command-line tool.
//!
//! Log output goes to stderr through a `tracing-subscriber` fmt layer.
//! The filter comes from the `MAPSTYLE_LOG` environment variable
//! (`warn` when unset) unless `-v` flags ask for more.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MAPSTYLE_LOG";

/// Log level for a count of `-v` flags.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the log filter for a count of `-v` flags.
pub fn filter_for(verbosity: u8) -> EnvFilter {
    if verbosity == 0 {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(0)))
    } else {
        EnvFilter::new(level_for(verbosity))
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber has already been installed.
pub fn init_logging(verbosity: u8) -> Result<(), TryInitError> {
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(fmt_layer)
        .try_init()
}
