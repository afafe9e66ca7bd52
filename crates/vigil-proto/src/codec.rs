//! JSON encoding of protocol messages.
//!
//! Each frame on the channel is exactly one JSON object. There is no length
//! prefix or envelope; framing is provided by the transport.

use crate::{
    errors::{ProtocolError, Result},
    inbound::Inbound,
    message::{ClientMessage, ServerMessage},
};

/// Serialize an outbound message into a frame payload.
pub fn encode(message: &ClientMessage) -> Result<Vec<u8>> {
    serde_json::to_vec(message).map_err(ProtocolError::Encoding)
}

/// Parse a frame payload into a server message.
pub fn decode(bytes: &[u8]) -> Result<ServerMessage> {
    serde_json::from_slice(bytes).map_err(ProtocolError::Decoding)
}

/// Parse a frame payload straight into its tagged form.
pub fn decode_inbound(bytes: &[u8]) -> Result<Inbound> {
    decode(bytes).map(ServerMessage::into_inbound)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        inbound::StatusCode,
        pubkey::{PUBKEY_LEN, ValidatorPubkey},
    };

    #[test]
    fn encode_uses_wire_field_names() {
        let pubkey = ValidatorPubkey::new([0xab; PUBKEY_LEN]);
        let bytes = encode(&ClientMessage::get_validator_status(pubkey)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["message"], "get_validator_status");
        assert_eq!(value["pubkey"], "ab".repeat(PUBKEY_LEN));
        assert_eq!(value.as_object().map(serde_json::Map::len), Some(2));
    }

    #[test]
    fn encode_activity() {
        let pubkey = ValidatorPubkey::new([0x01; PUBKEY_LEN]);
        let bytes = encode(&ClientMessage::activity(pubkey)).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, format!(r#"{{"message":"activity","pubkey":"{}"}}"#, "01".repeat(48)));
    }

    #[test]
    fn decode_full_validator_status() {
        let frame = br#"{
            "message": "validator_status",
            "pubkey": "aabb",
            "status": {"code": "active"},
            "action": "",
            "error": ""
        }"#;

        assert_eq!(
            decode_inbound(frame).unwrap(),
            Inbound::ValidatorStatus { pubkey: "aabb".to_string(), status: StatusCode::Active }
        );
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(matches!(decode(b"not json"), Err(ProtocolError::Decoding(_))));
    }

    #[test]
    fn decode_rejects_non_object() {
        assert!(matches!(decode(b"[1, 2, 3]"), Err(ProtocolError::Decoding(_))));
        assert!(matches!(decode(b"\"epoch\""), Err(ProtocolError::Decoding(_))));
    }

    #[test]
    fn decode_rejects_wrongly_typed_field() {
        assert!(matches!(decode(br#"{"message": 7}"#), Err(ProtocolError::Decoding(_))));
    }

    #[test]
    fn decode_empty_object_is_unknown_kind() {
        assert_eq!(decode_inbound(b"{}").unwrap(), Inbound::Unknown { kind: String::new() });
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&bytes);
        }

        #[test]
        fn unknown_status_codes_survive_decoding(code in "[a-z_]{1,16}") {
            let frame = serde_json::json!({
                "message": "validator_status",
                "pubkey": "",
                "status": {"code": code.clone()},
            });
            let bytes = serde_json::to_vec(&frame).unwrap();

            let Inbound::ValidatorStatus { status, .. } = decode_inbound(&bytes).unwrap() else {
                return Err(TestCaseError::fail("expected validator_status"));
            };
            prop_assert_eq!(status, StatusCode::parse(&code));
        }
    }
}
