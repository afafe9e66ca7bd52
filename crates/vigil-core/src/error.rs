//! Error types for the core state machines.

use thiserror::Error;
use vigil_proto::{ProtocolError, PubkeyError};

/// Errors from building a validator registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A line of the key list is not a valid public key
    #[error("line {line}: {source}")]
    InvalidKey {
        /// 1-based line number in the key list
        line: usize,
        /// Parse failure for that line
        #[source]
        source: PubkeyError,
    },
}

/// Errors from feeding frames to the activity tracker.
///
/// None of these are fatal. The dispatch loop logs them and drops the frame;
/// tracker state is left untouched.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Inbound frame could not be decoded
    #[error("discarding inbound frame: {0}")]
    Decode(#[from] ProtocolError),
}
