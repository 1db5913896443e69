//! OS signal handling.
//!
//! Resolves when the process is asked to terminate (SIGINT, or SIGTERM on
//! Unix) so the entry point can stop a started server.

use std::io;

/// Wait for Ctrl+C or SIGTERM.
pub async fn wait_for_termination() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutdown signal received");
    Ok(())
}
