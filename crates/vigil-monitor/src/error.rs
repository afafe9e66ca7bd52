//! Startup errors.
//!
//! Once the monitor is running nothing is fatal; these only occur while
//! building its configuration.

use std::{io, path::PathBuf};

use thiserror::Error;
use vigil_core::RegistryError;

/// Errors that prevent the monitor from starting.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Validator key file could not be read
    #[error("failed to read validator keys from {}: {source}", .path.display())]
    ReadKeys {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Validator key file contains an invalid key
    #[error("invalid validator keys in {}: {source}", .path.display())]
    InvalidKeys {
        /// Path given on the command line
        path: PathBuf,
        /// Parse failure
        #[source]
        source: RegistryError,
    },

    /// Beacon URL is not a plain WebSocket URL
    #[error("beacon url must start with ws://, got {0}")]
    InvalidUrl(String),

    /// Channel capacity of zero
    #[error("channel capacity must be at least 1")]
    ZeroCapacity,

    /// Logging could not be initialised
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
