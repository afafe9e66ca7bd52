//! Monitor configuration.

use std::{path::Path, time::Duration};

use vigil_core::{TrackerConfig, ValidatorRegistry};

use crate::error::MonitorError;

/// Default beacon client endpoint.
pub const DEFAULT_BEACON_URL: &str = "ws://127.0.0.1:9950/ws";

/// Connection provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// WebSocket endpoint of the beacon client
    pub url: String,
    /// Delay before the first reconnect attempt
    pub reconnect_delay: Duration,
    /// Upper bound for the doubling reconnect delay
    pub max_reconnect_delay: Duration,
    /// Outbound messages buffered ahead of the socket writer
    pub channel_capacity: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BEACON_URL.to_string(),
            reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(60),
            channel_capacity: 256,
        }
    }
}

impl ProviderConfig {
    /// Reject values the provider cannot run with.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.url.starts_with("ws://") {
            return Err(MonitorError::InvalidUrl(self.url.clone()));
        }
        if self.channel_capacity == 0 {
            return Err(MonitorError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Everything needed to start the monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Connection provider settings
    pub provider: ProviderConfig,
    /// Tracker settings
    pub tracker: TrackerConfig,
    /// Monitored validators
    pub registry: ValidatorRegistry,
}

/// Load a validator key file.
pub fn load_registry(path: &Path) -> Result<ValidatorRegistry, MonitorError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| MonitorError::ReadKeys { path: path.to_path_buf(), source })?;

    ValidatorRegistry::parse(&contents)
        .map_err(|source| MonitorError::InvalidKeys { path: path.to_path_buf(), source })
}
