//! WebSocket connection to the beacon client.
//!
//! [`BeaconClient`] is the connection provider: it owns the socket, publishes
//! one `connected` event per established connection and one `message` event
//! per received frame, and writes the runtime's outbound payloads. Reading and
//! writing run side by side, so a slow writer never stops replies from being
//! read. Connection loss is handled here with a doubling reconnect delay; the
//! runtime only observes the next `connected` event.
//!
//! Payloads that arrive while no connection is up are dropped. They were
//! produced for a connection that no longer exists, and the next `connected`
//! event makes the tracker re-query every validator anyway.

use futures::{SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::mpsc, time};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use vigil_app::EventPublisher;

use crate::{backoff::Backoff, config::ProviderConfig};

type BeaconStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a connected session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    /// Connection dropped; reconnect
    Disconnected,
    /// Runtime went away; stop
    Shutdown,
}

/// Connection provider backed by a WebSocket.
#[derive(Debug)]
pub struct BeaconClient {
    config: ProviderConfig,
    publisher: EventPublisher,
    outbound: mpsc::Receiver<Vec<u8>>,
}

impl BeaconClient {
    /// Create a client that publishes into `publisher` and writes payloads
    /// received on `outbound`.
    pub fn new(
        config: ProviderConfig,
        publisher: EventPublisher,
        outbound: mpsc::Receiver<Vec<u8>>,
    ) -> Self {
        Self { config, publisher, outbound }
    }

    /// Connect, serve and reconnect until the runtime drops its channel ends.
    pub async fn run(mut self) {
        let mut backoff =
            Backoff::new(self.config.reconnect_delay, self.config.max_reconnect_delay);

        loop {
            match connect_async(self.config.url.as_str()).await {
                Ok((stream, _response)) => {
                    backoff.reset();
                    info!(url = %self.config.url, "connected to beacon client");

                    self.discard_stale_outbound();
                    if self.publisher.connected().is_err() {
                        break;
                    }

                    match self.serve(stream).await {
                        SessionEnd::Disconnected => {
                            warn!(url = %self.config.url, "beacon connection lost");
                        },
                        SessionEnd::Shutdown => break,
                    }
                },
                Err(e) => {
                    warn!(url = %self.config.url, error = %e, "failed to connect to beacon client");
                },
            }

            let delay = backoff.next_delay();
            debug!(delay_ms = delay.as_millis() as u64, "waiting before reconnect");
            if self.wait(delay).await == SessionEnd::Shutdown {
                break;
            }
        }

        info!("beacon client stopped");
    }

    /// Read and write the socket concurrently until either side ends.
    ///
    /// The reader only publishes, which never waits, so replies keep flowing
    /// while the runtime is parked on a full outbound queue.
    async fn serve(&mut self, stream: BeaconStream) -> SessionEnd {
        let (mut write, mut read) = stream.split();
        let publisher = &self.publisher;
        let outbound = &mut self.outbound;

        let reader = async {
            loop {
                let data = match read.next().await {
                    Some(Ok(Message::Text(text))) => text.into_bytes(),
                    Some(Ok(Message::Binary(data))) => data,
                    Some(Ok(Message::Close(_))) | None => return SessionEnd::Disconnected,
                    // Ping and pong are answered by tungstenite
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!(error = %e, "beacon read failed");
                        return SessionEnd::Disconnected;
                    },
                };

                if publisher.message(data).is_err() {
                    return SessionEnd::Shutdown;
                }
            }
        };

        let writer = async {
            while let Some(payload) = outbound.recv().await {
                if let Err(e) = write.send(into_frame(payload)).await {
                    warn!(error = %e, "beacon write failed");
                    return SessionEnd::Disconnected;
                }
            }

            // Best effort; the process is shutting down
            let _ = write.send(Message::Close(None)).await;
            SessionEnd::Shutdown
        };

        tokio::select! {
            end = reader => end,
            end = writer => end,
        }
    }

    /// Sleep for `delay`, dropping outbound payloads meanwhile.
    async fn wait(&mut self, delay: time::Duration) -> SessionEnd {
        let sleep = time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                () = &mut sleep => return SessionEnd::Disconnected,
                payload = self.outbound.recv() => match payload {
                    Some(_) => debug!("dropping outbound message while disconnected"),
                    None => return SessionEnd::Shutdown,
                },
            }
        }
    }

    fn discard_stale_outbound(&mut self) {
        let mut dropped = 0usize;
        while self.outbound.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "dropped outbound messages from previous connection");
        }
    }
}

/// Payloads are JSON, so they go out as text; anything else as binary.
fn into_frame(payload: Vec<u8>) -> Message {
    match String::from_utf8(payload) {
        Ok(text) => Message::Text(text),
        Err(e) => Message::Binary(e.into_bytes()),
    }
}
