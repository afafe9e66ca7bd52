//! Error types for encoding and parsing protocol values.

use thiserror::Error;

/// Convenience alias for codec results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while converting messages to or from bytes.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Outbound message could not be serialized.
    #[error("failed to encode client message: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Inbound bytes are not a valid server message.
    #[error("failed to decode server message: {0}")]
    Decoding(#[source] serde_json::Error),
}

/// Errors produced while parsing a validator public key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PubkeyError {
    /// Input contains non-hex characters or has odd length.
    #[error("invalid hex in public key: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Input decoded to the wrong number of bytes.
    #[error("public key must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required key length in bytes
        expected: usize,
        /// Decoded length in bytes
        actual: usize,
    },
}
