//! Command line arguments.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use vigil_core::{ReconnectPolicy, TrackerConfig};

use crate::config::{DEFAULT_BEACON_URL, ProviderConfig};

/// Monitor validator liveness and report activity on every epoch.
#[derive(Debug, Parser)]
#[command(name = "vigil-monitor", version, about)]
pub struct Args {
    /// WebSocket endpoint of the beacon client
    #[arg(long, default_value = DEFAULT_BEACON_URL)]
    pub beacon_url: String,

    /// File with one hex-encoded validator public key per line
    #[arg(long, value_name = "FILE")]
    pub validators: PathBuf,

    /// Delay before the first reconnect attempt, in milliseconds
    #[arg(long, default_value_t = 1_000)]
    pub reconnect_delay_ms: u64,

    /// Upper bound for the reconnect delay, in milliseconds
    #[arg(long, default_value_t = 60_000)]
    pub max_reconnect_delay_ms: u64,

    /// Outbound messages buffered ahead of the socket writer
    #[arg(long, default_value_t = 256)]
    pub channel_capacity: usize,

    /// Keep last known liveness across reconnects instead of clearing it
    #[arg(long)]
    pub keep_state_on_reconnect: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Only log errors
    #[arg(long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Args {
    /// Connection provider settings.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            url: self.beacon_url.clone(),
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
            max_reconnect_delay: Duration::from_millis(self.max_reconnect_delay_ms),
            channel_capacity: self.channel_capacity,
        }
    }

    /// Tracker settings.
    pub fn tracker_config(&self) -> TrackerConfig {
        let reconnect = if self.keep_state_on_reconnect {
            ReconnectPolicy::PreserveLastKnown
        } else {
            ReconnectPolicy::Reset
        };
        TrackerConfig { reconnect }
    }
}
