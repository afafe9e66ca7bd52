//! In-process event subscriptions.
//!
//! The connection provider publishes on two topics: one notification per
//! established connection and one per received frame. [`EventSources`] fans
//! both into a single `next_event` so exactly one consumer ever handles them.

use thiserror::Error;
use tokio::sync::mpsc;
use vigil_core::MonitorEvent;

use crate::driver::Driver;

/// Failure to hand a value across a channel boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    /// The receiving side has gone away
    #[error("channel closed")]
    Closed,
}

/// Create a linked publisher and event source.
///
/// Both topics are unbounded and publishing never waits. The dispatch loop
/// can be parked on a full outbound channel while the provider is still
/// reading replies; a bounded topic there would stall both sides.
pub fn event_channel() -> (EventPublisher, EventSources) {
    let (connected_tx, connected_rx) = mpsc::unbounded_channel();
    let (messages_tx, messages_rx) = mpsc::unbounded_channel();

    (
        EventPublisher { connected: connected_tx, messages: messages_tx },
        EventSources { connected: connected_rx, messages: messages_rx },
    )
}

/// Publishing half, held by the connection provider.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    connected: mpsc::UnboundedSender<()>,
    messages: mpsc::UnboundedSender<Vec<u8>>,
}

impl EventPublisher {
    /// Publish a connection-established notification.
    pub fn connected(&self) -> Result<(), SendError> {
        self.connected.send(()).map_err(|_| SendError::Closed)
    }

    /// Publish a received frame.
    pub fn message(&self, frame: Vec<u8>) -> Result<(), SendError> {
        self.messages.send(frame).map_err(|_| SendError::Closed)
    }
}

/// Subscribing half, owned by the dispatch loop.
#[derive(Debug)]
pub struct EventSources {
    connected: mpsc::UnboundedReceiver<()>,
    messages: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl EventSources {
    /// Wait for the next event on either topic.
    ///
    /// Neither topic has priority. Within a topic events arrive in publish
    /// order. Returns `None` once every publisher for both topics is dropped
    /// and all buffered events are consumed.
    pub async fn next_event(&mut self) -> Option<MonitorEvent> {
        tokio::select! {
            Some(()) = self.connected.recv() => Some(MonitorEvent::Connected),
            Some(frame) = self.messages.recv() => Some(MonitorEvent::Message(frame)),
            else => None,
        }
    }
}

/// [`Driver`] over in-process channels.
///
/// Events come from [`EventSources`]; outbound payloads are pushed into a
/// channel drained by the transport's writer.
#[derive(Debug)]
pub struct ChannelDriver {
    sources: EventSources,
    outbound: mpsc::Sender<Vec<u8>>,
}

impl ChannelDriver {
    /// Create a driver from its two channel ends.
    pub fn new(sources: EventSources, outbound: mpsc::Sender<Vec<u8>>) -> Self {
        Self { sources, outbound }
    }
}

impl Driver for ChannelDriver {
    type Error = SendError;

    async fn next_event(&mut self) -> Option<MonitorEvent> {
        self.sources.next_event().await
    }

    async fn send(&mut self, payload: Vec<u8>) -> Result<(), SendError> {
        self.outbound.send(payload).await.map_err(|_| SendError::Closed)
    }
}
