//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the dispatch loop from the connection
//! provider. The monitor binary implements it over channels fed by a WebSocket
//! client; the simulation harness implements it over a scripted event queue.

use std::future::Future;

use vigil_core::MonitorEvent;

/// Abstracts I/O operations for the dispatch loop.
///
/// Implementations deliver events from both subscription topics through a
/// single [`Driver::next_event`], which makes the caller the sole
/// serialization point for tracker state.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next event from either topic.
    ///
    /// Returns `None` once no further events can arrive.
    fn next_event(&mut self) -> impl Future<Output = Option<MonitorEvent>> + Send;

    /// Send an encoded message to the beacon client.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be handed to the transport.
    /// The caller reports it and moves on; it is never retried.
    fn send(&mut self, payload: Vec<u8>) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
