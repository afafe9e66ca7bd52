//! Validator activity monitor process.
//!
//! Wires the generic [`vigil_app::Runtime`] to a WebSocket connection to the
//! beacon client. The [`beacon::BeaconClient`] owns the socket and its
//! reconnect policy; the runtime only ever sees connection and frame events.

pub mod backoff;
pub mod beacon;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use beacon::BeaconClient;
pub use cli::Args;
pub use config::{MonitorConfig, ProviderConfig};
pub use error::MonitorError;
