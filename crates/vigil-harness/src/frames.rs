//! Builders for inbound server frames.
//!
//! Frames are built as JSON values so tests can also exercise fields and
//! spellings the typed messages would never produce.

use serde_json::{Value, json};
use vigil_proto::ValidatorPubkey;

fn to_frame(value: &Value) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// `validator_status` frame for a key and status code.
pub fn validator_status(pubkey: &ValidatorPubkey, code: &str) -> Vec<u8> {
    validator_status_hex(&pubkey.to_hex(), code)
}

/// `validator_status` frame with an arbitrary pubkey string.
pub fn validator_status_hex(pubkey: &str, code: &str) -> Vec<u8> {
    to_frame(&json!({
        "message": "validator_status",
        "pubkey": pubkey,
        "status": {"code": code},
        "action": "",
        "error": "",
    }))
}

/// `epoch` frame.
pub fn epoch() -> Vec<u8> {
    to_frame(&json!({"message": "epoch"}))
}

/// `success` frame for an action.
pub fn success(action: &str) -> Vec<u8> {
    to_frame(&json!({"message": "success", "action": action}))
}

/// `error` frame carrying a description.
pub fn error(description: &str) -> Vec<u8> {
    to_frame(&json!({"message": "error", "error": description}))
}

/// Frame with a message kind the monitor does not know.
pub fn unknown(kind: &str) -> Vec<u8> {
    to_frame(&json!({"message": kind}))
}
