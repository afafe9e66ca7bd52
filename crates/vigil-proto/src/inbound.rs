//! Tagged view of inbound server messages.

use crate::message::ServerMessage;

/// Validator lifecycle code reported by the beacon node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    /// Deposited but not yet activated
    Inactive,
    /// Attesting and eligible for activity signals
    Active,
    /// Voluntarily exited or ejected
    Exited,
    /// Exit complete, balance can be withdrawn
    Withdrawable,
    /// Balance withdrawn
    Withdrawn,
    /// Any code this version does not recognise
    Other(String),
}

impl StatusCode {
    /// Parse a wire code. Unknown codes are preserved in [`StatusCode::Other`].
    pub fn parse(code: &str) -> Self {
        match code {
            "inactive" => Self::Inactive,
            "active" => Self::Active,
            "exited" => Self::Exited,
            "withdrawable" => Self::Withdrawable,
            "withdrawn" => Self::Withdrawn,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Inbound message after dispatch on its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Status report for one validator
    ValidatorStatus {
        /// Hex public key as sent by the server
        pubkey: String,
        /// Reported lifecycle code
        status: StatusCode,
    },

    /// A new epoch started
    Epoch,

    /// The server completed an action
    Success {
        /// Name of the completed action
        action: String,
    },

    /// The server reported an error
    Error {
        /// Error description
        error: String,
    },

    /// Message kind this version does not handle
    Unknown {
        /// The unrecognised kind
        kind: String,
    },
}

impl ServerMessage {
    /// Convert into the tagged form, dropping fields irrelevant to the kind.
    pub fn into_inbound(self) -> Inbound {
        match self.kind.as_str() {
            "validator_status" => Inbound::ValidatorStatus {
                pubkey: self.pubkey,
                status: StatusCode::parse(&self.status.code),
            },
            "epoch" => Inbound::Epoch,
            "success" => Inbound::Success { action: self.action },
            "error" => Inbound::Error { error: self.error },
            _ => Inbound::Unknown { kind: self.kind },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ServerStatus;

    #[test]
    fn status_codes_parse() {
        assert_eq!(StatusCode::parse("inactive"), StatusCode::Inactive);
        assert_eq!(StatusCode::parse("active"), StatusCode::Active);
        assert_eq!(StatusCode::parse("exited"), StatusCode::Exited);
        assert_eq!(StatusCode::parse("withdrawable"), StatusCode::Withdrawable);
        assert_eq!(StatusCode::parse("withdrawn"), StatusCode::Withdrawn);
    }

    #[test]
    fn status_codes_are_case_sensitive() {
        assert_eq!(StatusCode::parse("ACTIVE"), StatusCode::Other("ACTIVE".to_string()));
        assert_eq!(StatusCode::parse(""), StatusCode::Other(String::new()));
    }

    #[test]
    fn validator_status_keeps_pubkey_and_code() {
        let message = ServerMessage {
            kind: "validator_status".to_string(),
            pubkey: "abcd".to_string(),
            status: ServerStatus { code: "exited".to_string() },
            action: "ignored".to_string(),
            error: "ignored".to_string(),
        };

        assert_eq!(
            message.into_inbound(),
            Inbound::ValidatorStatus { pubkey: "abcd".to_string(), status: StatusCode::Exited }
        );
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let message = ServerMessage { kind: "slot".to_string(), ..ServerMessage::default() };
        assert_eq!(message.into_inbound(), Inbound::Unknown { kind: "slot".to_string() });
    }

    #[test]
    fn success_and_error_carry_their_field() {
        let success = ServerMessage {
            kind: "success".to_string(),
            action: "process_activity".to_string(),
            ..ServerMessage::default()
        };
        let error = ServerMessage {
            kind: "error".to_string(),
            error: "unknown validator".to_string(),
            ..ServerMessage::default()
        };

        assert_eq!(
            success.into_inbound(),
            Inbound::Success { action: "process_activity".to_string() }
        );
        assert_eq!(error.into_inbound(), Inbound::Error { error: "unknown validator".to_string() });
    }
}
