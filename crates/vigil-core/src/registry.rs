//! Ordered registry of monitored validators.
//!
//! The registry is fixed for the lifetime of the monitor. Order is the order
//! the keys were supplied in and determines the order of outbound requests,
//! which keeps logs and tests stable but carries no protocol meaning.

use std::collections::HashSet;

use vigil_proto::ValidatorPubkey;

use crate::error::RegistryError;

/// Ordered, duplicate-free list of validator public keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorRegistry {
    validators: Vec<ValidatorPubkey>,
}

impl ValidatorRegistry {
    /// Build a registry from keys in order. Later duplicates are dropped.
    pub fn new(keys: impl IntoIterator<Item = ValidatorPubkey>) -> Self {
        let mut seen = HashSet::new();
        let validators = keys.into_iter().filter(|key| seen.insert(*key)).collect();
        Self { validators }
    }

    /// Parse a key list: one hex key per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Trailing `#`
    /// comments after a key are also allowed.
    pub fn parse(input: &str) -> Result<Self, RegistryError> {
        let mut keys = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let key = ValidatorPubkey::from_hex(line)
                .map_err(|source| RegistryError::InvalidKey { line: index + 1, source })?;
            keys.push(key);
        }

        Ok(Self::new(keys))
    }

    /// Validators in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidatorPubkey> {
        self.validators.iter()
    }

    /// Whether the key belongs to a monitored validator.
    pub fn contains(&self, pubkey: &ValidatorPubkey) -> bool {
        self.validators.contains(pubkey)
    }

    /// Resolve a hex key from the wire to a monitored validator.
    ///
    /// Returns `None` both for well-formed keys we do not monitor and for
    /// strings that are not keys at all.
    pub fn lookup(&self, hex: &str) -> Option<ValidatorPubkey> {
        let pubkey = ValidatorPubkey::from_hex(hex).ok()?;
        self.contains(&pubkey).then_some(pubkey)
    }

    /// Number of monitored validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validators are monitored.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl FromIterator<ValidatorPubkey> for ValidatorRegistry {
    fn from_iter<I: IntoIterator<Item = ValidatorPubkey>>(iter: I) -> Self {
        Self::new(iter)
    }
}
