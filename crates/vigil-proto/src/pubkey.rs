//! Validator public keys.
//!
//! Keys are 48-byte BLS12-381 G1 points. On the wire they travel as lower-case
//! hex without a `0x` prefix; parsing is lenient about case and prefix so keys
//! copied from block explorers load as-is.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::errors::PubkeyError;

/// Length of a validator public key in bytes.
pub const PUBKEY_LEN: usize = 48;

/// A validator public key.
///
/// The key is the identity used for every lookup in the monitor. Equality and
/// hashing are over the raw bytes, so two hex spellings of the same key compare
/// equal once parsed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatorPubkey([u8; PUBKEY_LEN]);

impl ValidatorPubkey {
    /// Wrap raw key bytes.
    pub const fn new(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex string, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, PubkeyError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes = hex::decode(digits)?;
        let actual = bytes.len();
        let bytes: [u8; PUBKEY_LEN] = bytes
            .try_into()
            .map_err(|_| PubkeyError::InvalidLength { expected: PUBKEY_LEN, actual })?;

        Ok(Self(bytes))
    }

    /// Lower-case hex encoding as used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }
}

impl FromStr for ValidatorPubkey {
    type Err = PubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ValidatorPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ValidatorPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First and last four bytes are enough to tell keys apart in logs
        let hex = self.to_hex();
        write!(f, "ValidatorPubkey({}..{})", &hex[..8], &hex[hex.len() - 8..])
    }
}

impl Serialize for ValidatorPubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ValidatorPubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}
