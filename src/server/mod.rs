//! Server abstraction.
//!
//! # Data Flow
//! ```text
//! LaunchConfig ──(moved)──▶ ObjectServer::start
//!                               │
//!                               ├─ Ok(Started { bound_address })
//!                               └─ Err(StartupFailure { message })
//! ```
//!
//! # Design Decisions
//! - The launcher only sees this trait; the real object server is injected
//! - Start is atomic: the server is either ready or not started at all
//! - `BasicServer` is a minimal bundled implementation, not a sync engine

use std::future::Future;

use thiserror::Error;

use crate::config::LaunchConfig;

pub mod basic;

pub use basic::{BasicServer, ServerError};

/// Something that can be started from a [`LaunchConfig`].
pub trait ObjectServer {
    /// Start the server. Resolves once it is accepting traffic or has
    /// definitively failed to start.
    fn start(
        &mut self,
        config: LaunchConfig,
    ) -> impl Future<Output = Result<Started, StartupFailure>> + Send;
}

/// Successful start report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Started {
    /// Address/port descriptor as reported by the server.
    pub bound_address: String,
}

impl Started {
    pub fn new(bound_address: impl Into<String>) -> Self {
        Self {
            bound_address: bound_address.into(),
        }
    }
}

/// The server did not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StartupFailure {
    pub message: String,
}

impl StartupFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ServerError> for StartupFailure {
    fn from(err: ServerError) -> Self {
        Self::new(err.to_string())
    }
}
