//! Object server launcher.
//!
//! # Architecture Overview
//!
//! ```text
//!   <base>/launcher.toml ──┐
//!   license (file / env) ──┼─▶ config::loader ─▶ LaunchConfig
//!                          │                        │
//!                          │      observability ◀───┤ log_sink
//!                          │                        ▼
//!                          │            lifecycle::launch(config, &mut server)
//!                          │                        │
//!                          │            ┌───────────┴───────────┐
//!                          │            ▼                       ▼
//!                          │   Started { address }     Failed { message }
//!                          │   wait for SIGINT/SIGTERM  logged, process exits
//!                          │   then stop the server
//! ```
//!
//! Relative paths resolve against the base directory, the parent of the
//! directory holding this executable.

use sync_launcher::config::loader;
use sync_launcher::lifecycle::{launch, signals, Outcome};
use sync_launcher::observability::init_logging;
use sync_launcher::server::BasicServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_dir = loader::base_dir()?;
    let config = loader::load(&base_dir)?;
    let _log_guard = init_logging(&config.log_sink)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_dir = %base_dir.display(),
        data_directory = %config.data_directory.display(),
        listen_address = %config.listen_address,
        "sync-launcher starting"
    );

    let mut server = BasicServer::new();
    match launch(config, &mut server).await {
        Outcome::Started { .. } => {
            signals::wait_for_termination().await?;
            server.stop().await?;
        }
        // Already reported by `launch`; a failed start is not a process error.
        Outcome::Failed { .. } => {}
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
