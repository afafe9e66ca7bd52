//! Event dispatch loop.
//!
//! Pulls events from a [`Driver`] one at a time, hands them to the
//! [`ActivityTracker`] and executes the returned actions before taking the next
//! event. Nothing else touches the tracker, which is what lets it run without
//! locks.

use vigil_core::{ActivityAction, ActivityTracker, MonitorEvent};
use vigil_proto::{ClientMessage, encode};

use crate::driver::Driver;

/// Counters kept by the dispatch loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Events taken from the driver
    pub events: u64,
    /// Connection-established events among them
    pub connections: u64,
    /// Inbound frames dropped because they did not decode
    pub frames_discarded: u64,
    /// Outbound messages handed to the driver
    pub messages_sent: u64,
    /// Outbound messages that failed to encode or send
    pub send_failures: u64,
}

/// Single-consumer dispatch loop.
pub struct Runtime<D: Driver> {
    driver: D,
    tracker: ActivityTracker,
    stats: RuntimeStats,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime owning the driver and tracker.
    pub fn new(driver: D, tracker: ActivityTracker) -> Self {
        Self { driver, tracker, stats: RuntimeStats::default() }
    }

    /// Tracker state, for inspection between steps.
    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Counters since construction.
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Process events until the driver has no more.
    ///
    /// In the monitor this runs for the lifetime of the process.
    pub async fn run(&mut self) {
        tracing::info!(validators = self.tracker.registry().len(), "activity monitor started");

        while let Some(event) = self.driver.next_event().await {
            self.step(event).await;
        }

        tracing::info!(stats = ?self.stats, "event sources closed, activity monitor stopped");
    }

    /// Process exactly one event, including all actions it produces.
    pub async fn step(&mut self, event: MonitorEvent) {
        self.stats.events += 1;

        let actions = match event {
            MonitorEvent::Connected => {
                self.stats.connections += 1;
                tracing::info!("beacon client connected");
                self.tracker.on_connected()
            },
            MonitorEvent::Message(frame) => match self.tracker.handle_frame(&frame) {
                Ok(actions) => actions,
                Err(error) => {
                    self.stats.frames_discarded += 1;
                    tracing::warn!(%error, len = frame.len(), "error decoding beacon message");
                    return;
                },
            },
        };

        self.execute(actions).await;
    }

    async fn execute(&mut self, actions: Vec<ActivityAction>) {
        for action in actions {
            match action {
                ActivityAction::SendMessage(message) => self.send_message(&message).await,
            }
        }
    }

    async fn send_message(&mut self, message: &ClientMessage) {
        let kind = message.kind.as_str();
        let pubkey = message.pubkey;

        let payload = match encode(message) {
            Ok(payload) => payload,
            Err(error) => {
                self.stats.send_failures += 1;
                tracing::warn!(%error, kind, %pubkey, "error encoding message");
                return;
            },
        };

        match self.driver.send(payload).await {
            Ok(()) => {
                self.stats.messages_sent += 1;
                tracing::debug!(kind, %pubkey, "message sent");
            },
            Err(error) => {
                self.stats.send_failures += 1;
                tracing::warn!(%error, kind, %pubkey, "error sending message");
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use vigil_core::{Liveness, TrackerConfig, ValidatorRegistry};
    use vigil_proto::{PUBKEY_LEN, ValidatorPubkey};

    use super::*;
    use crate::sources::SendError;

    /// Minimal driver: replays queued events, records payloads.
    struct QueueDriver {
        events: VecDeque<MonitorEvent>,
        sent: Vec<Vec<u8>>,
    }

    impl Driver for QueueDriver {
        type Error = SendError;

        async fn next_event(&mut self) -> Option<MonitorEvent> {
            self.events.pop_front()
        }

        async fn send(&mut self, payload: Vec<u8>) -> Result<(), SendError> {
            self.sent.push(payload);
            Ok(())
        }
    }

    fn key(byte: u8) -> ValidatorPubkey {
        ValidatorPubkey::new([byte; PUBKEY_LEN])
    }

    fn runtime(events: Vec<MonitorEvent>) -> Runtime<QueueDriver> {
        let registry: ValidatorRegistry = [key(0xaa), key(0xbb)].into_iter().collect();
        let tracker = ActivityTracker::new(registry, TrackerConfig::default());
        Runtime::new(QueueDriver { events: events.into(), sent: Vec::new() }, tracker)
    }

    #[tokio::test]
    async fn run_drains_driver() {
        let status = format!(
            r#"{{"message":"validator_status","pubkey":"{}","status":{{"code":"active"}}}}"#,
            key(0xaa).to_hex()
        );
        let mut runtime = runtime(vec![
            MonitorEvent::Connected,
            MonitorEvent::Message(status.into_bytes()),
            MonitorEvent::Message(br#"{"message":"epoch"}"#.to_vec()),
        ]);

        runtime.run().await;

        assert_eq!(runtime.tracker().liveness(&key(0xaa)), Some(Liveness::Active));
        assert_eq!(runtime.driver().sent.len(), 3);
        assert_eq!(runtime.stats(), RuntimeStats {
            events: 3,
            connections: 1,
            frames_discarded: 0,
            messages_sent: 3,
            send_failures: 0,
        });
    }

    #[tokio::test]
    async fn undecodable_frame_is_counted_and_dropped() {
        let mut runtime = runtime(Vec::new());

        runtime.step(MonitorEvent::Message(b"\x00\x01".to_vec())).await;

        assert!(runtime.driver().sent.is_empty());
        assert_eq!(runtime.stats().frames_discarded, 1);
        assert_eq!(runtime.tracker().active_count(), 0);
    }
}
