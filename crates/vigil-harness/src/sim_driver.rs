//! Scripted driver for deterministic tests.
//!
//! Events are replayed from a queue in insertion order, so the cross-topic
//! interleaving is fully controlled by the test. Sent payloads are recorded and
//! individual sends can be made to fail.

use std::collections::{HashSet, VecDeque};

use thiserror::Error;
use vigil_app::{Driver, MonitorEvent};
use vigil_proto::{ClientMessage, ValidatorPubkey};

/// Errors produced by [`SimDriver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Send failure injected by the test
    #[error("injected send failure for {0}")]
    InjectedFailure(ValidatorPubkey),

    /// Runtime produced a payload that is not a client message
    #[error("malformed outbound payload: {0}")]
    MalformedPayload(String),
}

/// Driver backed by an in-memory event queue.
#[derive(Debug, Default)]
pub struct SimDriver {
    events: VecDeque<MonitorEvent>,
    sent: Vec<ClientMessage>,
    failing: HashSet<ValidatorPubkey>,
    failed_attempts: usize,
}

impl SimDriver {
    /// Create a driver with no queued events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for delivery.
    pub fn push_event(&mut self, event: MonitorEvent) {
        self.events.push_back(event);
    }

    /// Queue a connection-established event.
    pub fn push_connected(&mut self) {
        self.push_event(MonitorEvent::Connected);
    }

    /// Queue an inbound frame.
    pub fn push_frame(&mut self, frame: Vec<u8>) {
        self.push_event(MonitorEvent::Message(frame));
    }

    /// Make every send for this validator fail.
    pub fn fail_sends_for(&mut self, pubkey: ValidatorPubkey) {
        self.failing.insert(pubkey);
    }

    /// Stop failing sends for this validator.
    pub fn heal_sends_for(&mut self, pubkey: &ValidatorPubkey) {
        self.failing.remove(pubkey);
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Messages successfully sent, oldest first.
    pub fn sent(&self) -> &[ClientMessage] {
        &self.sent
    }

    /// Remove and return all recorded messages.
    pub fn take_sent(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.sent)
    }

    /// Number of sends that failed by injection.
    pub fn failed_attempts(&self) -> usize {
        self.failed_attempts
    }
}

impl Driver for SimDriver {
    type Error = SimError;

    async fn next_event(&mut self) -> Option<MonitorEvent> {
        self.events.pop_front()
    }

    async fn send(&mut self, payload: Vec<u8>) -> Result<(), SimError> {
        let message: ClientMessage = serde_json::from_slice(&payload)
            .map_err(|e| SimError::MalformedPayload(e.to_string()))?;

        if self.failing.contains(&message.pubkey) {
            self.failed_attempts += 1;
            tracing::debug!(pubkey = %message.pubkey, "injecting send failure");
            return Err(SimError::InjectedFailure(message.pubkey));
        }

        self.sent.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vigil_proto::encode;

    use super::*;
    use crate::pubkey;

    #[tokio::test]
    async fn replays_events_in_order() {
        let mut driver = SimDriver::new();
        driver.push_connected();
        driver.push_frame(b"x".to_vec());

        assert_eq!(driver.next_event().await, Some(MonitorEvent::Connected));
        assert_eq!(driver.next_event().await, Some(MonitorEvent::Message(b"x".to_vec())));
        assert_eq!(driver.next_event().await, None);
    }

    #[tokio::test]
    async fn injected_failures_are_not_recorded() {
        let mut driver = SimDriver::new();
        driver.fail_sends_for(pubkey(1));

        let ok = encode(&ClientMessage::activity(pubkey(2))).unwrap();
        let failing = encode(&ClientMessage::activity(pubkey(1))).unwrap();

        assert_eq!(driver.send(failing.clone()).await, Err(SimError::InjectedFailure(pubkey(1))));
        assert!(driver.send(ok).await.is_ok());

        driver.heal_sends_for(&pubkey(1));
        assert!(driver.send(failing).await.is_ok());

        assert_eq!(driver.sent(), &[
            ClientMessage::activity(pubkey(2)),
            ClientMessage::activity(pubkey(1))
        ]);
        assert_eq!(driver.failed_attempts(), 1);
    }

    #[tokio::test]
    async fn rejects_non_client_payload() {
        let mut driver = SimDriver::new();
        let result = driver.send(b"{}".to_vec()).await;
        assert!(matches!(result, Err(SimError::MalformedPayload(_))));
    }
}
