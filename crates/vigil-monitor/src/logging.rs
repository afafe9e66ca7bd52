//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::MonitorError;

/// Install the global subscriber.
///
/// `--quiet` wins over everything. Otherwise `RUST_LOG` is used when set, and
/// the verbosity count picks the level when it is not.
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<(), MonitorError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity, quiet))
        .with_target(false)
        .try_init()
        .map_err(|e| MonitorError::Logging(e.to_string()))
}

fn filter(verbosity: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(verbosity)))
}

fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
