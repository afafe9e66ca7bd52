//! Validator activity monitor binary.

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use tokio::{sync::mpsc, time};
use tracing::{error, info, warn};
use vigil_app::{ChannelDriver, Runtime, event_channel};
use vigil_core::ActivityTracker;
use vigil_monitor::{Args, BeaconClient, MonitorConfig, MonitorError, config::load_registry, logging};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbosity, args.quiet) {
        report_without_logging(&e);
        return ExitCode::FAILURE;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "monitor failed to start");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: &Args) -> Result<(), MonitorError> {
    let config = MonitorConfig {
        provider: args.provider_config(),
        tracker: args.tracker_config(),
        registry: load_registry(&args.validators)?,
    };
    config.provider.validate()?;

    info!(
        validators = config.registry.len(),
        url = %config.provider.url,
        reconnect = ?config.tracker.reconnect,
        "starting validator activity monitor"
    );

    let (publisher, sources) = event_channel();
    let (outbound_tx, outbound_rx) = mpsc::channel(config.provider.channel_capacity);

    let beacon = tokio::spawn(BeaconClient::new(config.provider, publisher, outbound_rx).run());

    let tracker = ActivityTracker::new(config.registry, config.tracker);
    let mut runtime = Runtime::new(ChannelDriver::new(sources, outbound_tx), tracker);

    tokio::select! {
        () = runtime.run() => {},
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutdown requested");
        },
    }

    info!(
        events = runtime.stats().events,
        messages_sent = runtime.stats().messages_sent,
        send_failures = runtime.stats().send_failures,
        "monitor stopped"
    );

    // Dropping the runtime closes the outbound channel, which stops the client
    drop(runtime);
    match time::timeout(SHUTDOWN_GRACE, beacon).await {
        Ok(Ok(())) => {},
        Ok(Err(e)) => error!(error = %e, "beacon client task failed"),
        Err(_) => warn!("beacon client did not stop in time"),
    }

    Ok(())
}

/// No subscriber is installed, so stderr is the only place left.
#[allow(clippy::print_stderr)]
fn report_without_logging(e: &MonitorError) {
    eprintln!("{e}");
}
