//! Flight tracker client entry point
//!
//! Run with:
//! ```bash
//! cargo run -p tracker-client
//! ```
//!
//! Configuration is loaded from environment variables. This binary is the
//! stand-in rendering collaborator: it connects, joins, and periodically
//! logs a summary of the derived collections.

use std::time::Duration;
use tracing::{error, info};
use tracker_client::telemetry::try_init_tracing;
use tracker_client::{ClientConfig, FlightTracker};

/// How often the derived-state summary is logged
const SUMMARY_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the client
    if let Err(e) = run().await {
        error!(error = %e, "Tracker failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting flight tracker client...");

    // Load configuration
    let config = ClientConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        url = %config.url,
        username = %config.username,
        "Configuration loaded"
    );

    let tracker = FlightTracker::new(&config);
    tracker.connect();
    tracker.join(config.user_id.clone(), config.username.clone());

    let mut summary = tokio::time::interval(SUMMARY_INTERVAL);

    loop {
        tokio::select! {
            _ = summary.tick() => {
                info!(
                    connected = tracker.is_connected(),
                    flights = tracker.flights().len(),
                    airports = tracker.airports().len(),
                    live_planes = tracker.live_planes().len(),
                    events = tracker.events().len(),
                    messages = tracker.messages().len(),
                    "Derived state summary"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                tracker.disconnect();
                break;
            }
        }
    }

    Ok(())
}
