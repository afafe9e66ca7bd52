//! Activity state machine for monitored validators.
//!
//! Tracks which validators the beacon node reports as active and decides when
//! to send status requests and activity signals.
//!
//! # Architecture: Action-Based State Machine
//!
//! - Methods take already-received inputs (connection events, frames)
//! - Methods return `Vec<ActivityAction>` describing messages to send
//! - The runtime encodes and sends them, logging failures per message
//!
//! # State Machine
//!
//! One instance per monitored validator, keyed by public key:
//!
//! ```text
//!                 validator_status(active)
//!            ┌──────────────────────────────────┐
//!            │                                  ▼
//! ┌─────────┐│  validator_status(inactive,  ┌────────┐
//! │ Unknown │┼─ exited, withdrawable, ─────>│Inactive│<─┐
//! └─────────┘│  withdrawn)                  └────────┘  │
//!      ▲     │                                 │  ▲     │
//!      │     │                         active  │  │ inactive/exited/...
//!      │     │                                 ▼  │     │
//!      │     └─────────────────────────────>┌────────┐  │
//!      │                                    │ Active │──┘
//!      │      connected (Reset policy)      └────────┘
//!      └──────────────────────────────────────────┘
//! ```
//!
//! Only `validator_status` messages move a validator between `Active` and
//! `Inactive`. `epoch` reads the state and never changes it. There is no
//! terminal state.
//!
//! # Reconnection
//!
//! After a reconnect every validator is queried again. Until the replies
//! arrive the previous answers may be stale. [`ReconnectPolicy::Reset`] forgets
//! them so no activity is sent on stale information;
//! [`ReconnectPolicy::PreserveLastKnown`] keeps them so an epoch that races the
//! replies still produces activity for validators that were active.

use std::collections::HashMap;

use vigil_proto::{ClientMessage, Inbound, StatusCode, ValidatorPubkey, decode_inbound};

use crate::{error::TrackerError, registry::ValidatorRegistry};

/// Action name the server reports after processing an activity signal.
pub const PROCESS_ACTIVITY_ACTION: &str = "process_activity";

/// Actions returned by the activity tracker.
///
/// The runtime executes these in order. A failure executing one action is
/// logged and does not prevent the remaining actions from running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    /// Encode this message and send it to the beacon client
    SendMessage(ClientMessage),
}

/// Known liveness of a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    /// Validator is active; send activity each epoch
    Active,
    /// Validator is pending activation or has exited; send nothing
    Inactive,
}

impl Liveness {
    /// Liveness implied by a reported status code.
    ///
    /// Returns `None` for codes that should leave the current state alone.
    pub fn from_status(status: &StatusCode) -> Option<Self> {
        match status {
            StatusCode::Active => Some(Self::Active),
            StatusCode::Inactive
            | StatusCode::Exited
            | StatusCode::Withdrawable
            | StatusCode::Withdrawn => Some(Self::Inactive),
            StatusCode::Other(_) => None,
        }
    }
}

/// How the tracker treats known liveness when the connection is re-established.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Forget all liveness and wait for fresh status replies
    #[default]
    Reset,
    /// Keep last known liveness until fresh replies overwrite it
    PreserveLastKnown,
}

/// Tracker configuration
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// Treatment of known liveness on reconnect
    pub reconnect: ReconnectPolicy,
}

/// Activity state machine
///
/// Owns the liveness mapping for all monitored validators. It must only be
/// driven from a single consumer context; it holds no locks.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    registry: ValidatorRegistry,
    config: TrackerConfig,
    /// Absent keys are Unknown
    liveness: HashMap<ValidatorPubkey, Liveness>,
}

impl ActivityTracker {
    /// Create a tracker with every validator Unknown.
    pub fn new(registry: ValidatorRegistry, config: TrackerConfig) -> Self {
        Self { registry, config, liveness: HashMap::new() }
    }

    /// Monitored validators.
    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Known liveness of a validator, `None` if Unknown.
    pub fn liveness(&self, pubkey: &ValidatorPubkey) -> Option<Liveness> {
        self.liveness.get(pubkey).copied()
    }

    /// Number of validators currently known to be active.
    pub fn active_count(&self) -> usize {
        self.liveness.values().filter(|l| **l == Liveness::Active).count()
    }

    /// Handle a (re)established connection.
    ///
    /// Returns one status request per monitored validator, in registry order,
    /// regardless of what is currently known about it.
    pub fn on_connected(&mut self) -> Vec<ActivityAction> {
        if self.config.reconnect == ReconnectPolicy::Reset && !self.liveness.is_empty() {
            tracing::debug!(known = self.liveness.len(), "clearing liveness after reconnect");
            self.liveness.clear();
        }

        tracing::debug!(validators = self.registry.len(), "requesting validator statuses");

        self.registry
            .iter()
            .map(|pubkey| ActivityAction::SendMessage(ClientMessage::get_validator_status(*pubkey)))
            .collect()
    }

    /// Handle a raw inbound frame.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Decode` if the frame is not a server message.
    /// State is unchanged in that case.
    pub fn handle_frame(&mut self, bytes: &[u8]) -> Result<Vec<ActivityAction>, TrackerError> {
        let message = decode_inbound(bytes)?;
        Ok(self.handle_message(message))
    }

    /// Handle a decoded inbound message.
    pub fn handle_message(&mut self, message: Inbound) -> Vec<ActivityAction> {
        match message {
            Inbound::ValidatorStatus { pubkey, status } => {
                self.apply_status(&pubkey, &status);
                Vec::new()
            },
            Inbound::Epoch => self.on_epoch(),
            Inbound::Success { action } => {
                if action == PROCESS_ACTIVITY_ACTION {
                    tracing::info!("processed validator activity successfully");
                }
                Vec::new()
            },
            Inbound::Error { error } => {
                tracing::warn!(%error, "beacon server error");
                Vec::new()
            },
            Inbound::Unknown { kind } => {
                tracing::trace!(%kind, "ignoring unknown message kind");
                Vec::new()
            },
        }
    }

    fn apply_status(&mut self, pubkey: &str, status: &StatusCode) {
        // Replies for keys we do not monitor are stale or foreign
        let Some(validator) = self.registry.lookup(pubkey) else {
            tracing::debug!(%pubkey, "status for unmonitored validator");
            return;
        };

        let Some(liveness) = Liveness::from_status(status) else {
            tracing::debug!(pubkey = %validator, ?status, "ignoring unrecognised status code");
            return;
        };

        match status {
            StatusCode::Active => {
                tracing::info!(pubkey = %validator, "validator is active, sending activity");
            },
            StatusCode::Inactive => {
                tracing::info!(pubkey = %validator, "validator is inactive, waiting until active");
            },
            _ => tracing::info!(pubkey = %validator, ?status, "validator has exited"),
        }

        self.liveness.insert(validator, liveness);
    }

    fn on_epoch(&self) -> Vec<ActivityAction> {
        let actions: Vec<_> = self
            .registry
            .iter()
            .filter(|pubkey| self.liveness(pubkey) == Some(Liveness::Active))
            .map(|pubkey| {
                tracing::info!(%pubkey, "new epoch, sending activity");
                ActivityAction::SendMessage(ClientMessage::activity(*pubkey))
            })
            .collect();

        if actions.is_empty() {
            tracing::debug!("new epoch, no active validators");
        }

        actions
    }
}
