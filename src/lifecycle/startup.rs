//! Startup orchestration.
//!
//! # Responsibilities
//! - Hand the launch configuration to the server abstraction
//! - Wait for the start to settle
//! - Report the outcome to the operator, exactly once
//!
//! # Design Decisions
//! - One start attempt: no retry, no backoff
//! - No timeout: a start that never settles keeps `launch` pending
//! - Failure is logged and returned, never propagated as an error; the
//!   entry point decides what a failed start means for the process

use crate::config::LaunchConfig;
use crate::server::ObjectServer;

/// Result of one launch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server is accepting traffic at `bound_address`.
    Started { bound_address: String },
    /// The server did not start.
    Failed { message: String },
}

impl Outcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Outcome::Started { .. })
    }
}

/// Start `server` with `config` and log how it went.
pub async fn launch<S>(config: LaunchConfig, server: &mut S) -> Outcome
where
    S: ObjectServer,
{
    match server.start(config).await {
        Ok(started) => {
            tracing::info!(
                address = %started.bound_address,
                "Object server was started on {}",
                started.bound_address
            );
            Outcome::Started {
                bound_address: started.bound_address,
            }
        }
        Err(failure) => {
            tracing::error!("Error starting object server: {}", failure.message);
            Outcome::Failed {
                message: failure.message,
            }
        }
    }
}
