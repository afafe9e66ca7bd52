//! World state after scenario execution.
//!
//! Holds the tracker as the runtime left it, every message sent and which
//! script step produced it.

use vigil_app::RuntimeStats;
use vigil_core::{ActivityTracker, Liveness};
use vigil_proto::{ClientKind, ClientMessage, ValidatorPubkey};

/// Final state of a scenario run.
pub struct World {
    tracker: ActivityTracker,
    stats: RuntimeStats,
    /// Messages sent, grouped by the script step that produced them
    sent_by_step: Vec<Vec<ClientMessage>>,
    failed_sends: usize,
}

impl World {
    pub(crate) fn new(
        tracker: ActivityTracker,
        stats: RuntimeStats,
        sent_by_step: Vec<Vec<ClientMessage>>,
        failed_sends: usize,
    ) -> Self {
        Self { tracker, stats, sent_by_step, failed_sends }
    }

    /// Tracker after the last step.
    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    /// Final liveness of a validator.
    pub fn liveness(&self, pubkey: &ValidatorPubkey) -> Option<Liveness> {
        self.tracker.liveness(pubkey)
    }

    /// Runtime counters.
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Number of script steps executed.
    pub fn steps(&self) -> usize {
        self.sent_by_step.len()
    }

    /// Messages sent while processing one step (0-based).
    pub fn sent_at(&self, step: usize) -> &[ClientMessage] {
        self.sent_by_step.get(step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All messages sent, in order.
    pub fn sent(&self) -> Vec<ClientMessage> {
        self.sent_by_step.iter().flatten().cloned().collect()
    }

    /// Keys that received a message of the given kind, in send order.
    pub fn sent_to(&self, kind: ClientKind) -> Vec<ValidatorPubkey> {
        self.sent_by_step
            .iter()
            .flatten()
            .filter(|m| m.kind == kind)
            .map(|m| m.pubkey)
            .collect()
    }

    /// Number of sends rejected by injected failures.
    pub fn failed_sends(&self) -> usize {
        self.failed_sends
    }
}
