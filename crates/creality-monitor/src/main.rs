//! Creality printer monitor.
//!
//! Main entry point: connects to one printer, follows its state over the
//! WebSocket API and logs every transition until interrupted.

mod config;

use anyhow::Result;
use creality_coordinator::PrinterCoordinator;
use creality_entities::format_duration;
use creality_http::PrinterWebClient;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = config::load()?;
    info!("Starting Creality monitor for {}", settings.printer.host);

    // A failed probe is not fatal: the coordinator retries forever anyway
    let web = PrinterWebClient::new(settings.printer.clone())?;
    match web.validate_connection().await {
        Ok(()) => info!("Printer is reachable"),
        Err(e) => warn!("{}; will keep retrying", e),
    }

    let coordinator = PrinterCoordinator::new(settings.printer.clone());
    let mut updates = coordinator.subscribe();
    coordinator.start().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
            update = updates.recv() => match update {
                Ok(update) if update.changed() => {
                    let state = &update.new_state;
                    info!(
                        "{} | {} | {:.1}% | nozzle {:.1}/{:.1} | bed {:.1}/{:.1} | remaining {}",
                        state.state,
                        if state.filename.is_empty() { "no file" } else { state.filename.as_str() },
                        state.progress,
                        state.nozzle_temp,
                        state.nozzle_target,
                        state.bed_temp,
                        state.bed_target,
                        format_duration(state.print_time_remaining),
                    );
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Missed {} printer updates", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    coordinator.stop().await;
    Ok(())
}
