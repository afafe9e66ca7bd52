//! Message structures as they appear on the wire.

use serde::{Deserialize, Serialize};

use crate::pubkey::ValidatorPubkey;

/// Kind of request sent to the beacon client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    /// Ask for the current status of a validator
    GetValidatorStatus,
    /// Signal that a validator is alive for the current epoch
    Activity,
}

impl ClientKind {
    /// Wire name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetValidatorStatus => "get_validator_status",
            Self::Activity => "activity",
        }
    }
}

/// Outbound message from the monitor to the beacon client.
///
/// # Wire Format
///
/// ```json
/// {"message": "get_validator_status", "pubkey": "<96 hex chars>"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    /// Request kind, serialized under the `message` field
    #[serde(rename = "message")]
    pub kind: ClientKind,

    /// Validator the request refers to
    pub pubkey: ValidatorPubkey,
}

impl ClientMessage {
    /// Status request for a validator.
    pub const fn get_validator_status(pubkey: ValidatorPubkey) -> Self {
        Self { kind: ClientKind::GetValidatorStatus, pubkey }
    }

    /// Activity signal for a validator.
    pub const fn activity(pubkey: ValidatorPubkey) -> Self {
        Self { kind: ClientKind::Activity, pubkey }
    }
}

/// Status object nested in a server message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Lifecycle code reported by the beacon node (`active`, `exited`, ...)
    #[serde(default)]
    pub code: String,
}

/// Inbound message from the beacon client, in its flat wire shape.
///
/// Every field is optional on the wire and defaults to empty. `kind` decides
/// which of the other fields are meaningful; use
/// [`ServerMessage::into_inbound`] to get the tagged form.
///
/// The `pubkey` stays a string here: a response can name a key that is not
/// well-formed, and that case means "not one of ours" rather than a decoding
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Message kind (`validator_status`, `epoch`, `success`, `error`)
    #[serde(rename = "message", default)]
    pub kind: String,

    /// Hex public key for `validator_status`
    #[serde(default)]
    pub pubkey: String,

    /// Status for `validator_status`
    #[serde(default)]
    pub status: ServerStatus,

    /// Completed action for `success`
    #[serde(default)]
    pub action: String,

    /// Error description for `error`
    #[serde(default)]
    pub error: String,
}
