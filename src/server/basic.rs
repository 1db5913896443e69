//! Minimal bundled server.
//!
//! # Responsibilities
//! - Create and probe the data directory
//! - Bind the listener and serve `/health`
//! - Report the bound address, stop gracefully on request

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::{routing::get, Json, Router};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::config::LaunchConfig;
use crate::server::{ObjectServer, Started, StartupFailure};

const WRITE_PROBE: &str = ".write-probe";

/// Errors raised while starting or stopping a [`BasicServer`].
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server is already running on {0}")]
    AlreadyStarted(SocketAddr),

    #[error("license material is empty")]
    MissingLicense,

    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),

    #[error("data directory {} is not usable: {source}", path.display())]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// A running or stopped HTTP server.
///
/// Owned by the entry point; dropping it closes the shutdown channel, which
/// stops serving.
#[derive(Default)]
pub struct BasicServer {
    address: Option<SocketAddr>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<io::Result<()>>>,
}

impl BasicServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound address, once started.
    pub fn address(&self) -> Option<SocketAddr> {
        self.address
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Signal graceful shutdown and wait for the serving task to finish.
    pub async fn stop(&mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let result = match self.task.take() {
            Some(task) => task.await?.map_err(ServerError::Serve),
            None => Ok(()),
        };
        if let Some(address) = self.address.take() {
            tracing::info!(address = %address, "Server stopped");
        }
        result
    }

    fn router() -> Router {
        Router::new()
            .route("/health", get(health))
            .layer(TraceLayer::new_for_http())
    }

    async fn try_start(&mut self, config: LaunchConfig) -> Result<SocketAddr, ServerError> {
        if let (Some(address), true) = (self.address, self.is_running()) {
            return Err(ServerError::AlreadyStarted(address));
        }
        if config.license.is_empty() {
            return Err(ServerError::MissingLicense);
        }

        let addr: SocketAddr = config
            .listen_address
            .parse()
            .map_err(|_| ServerError::InvalidAddress(config.listen_address.clone()))?;

        prepare_data_directory(&config.data_directory).await?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                address: addr,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            address: addr,
            source,
        })?;

        let (tx, rx) = oneshot::channel::<()>();
        let app = Self::router();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await
        });

        tracing::debug!(
            address = %local_addr,
            data_directory = %config.data_directory.display(),
            "Server accepting connections"
        );

        self.address = Some(local_addr);
        self.shutdown = Some(tx);
        self.task = Some(task);
        Ok(local_addr)
    }
}

impl ObjectServer for BasicServer {
    async fn start(&mut self, config: LaunchConfig) -> Result<Started, StartupFailure> {
        let address = self.try_start(config).await?;
        Ok(Started::new(address.to_string()))
    }
}

/// Create `path` if needed and check that files can be written in it.
async fn prepare_data_directory(path: &Path) -> Result<(), ServerError> {
    let usable = |source: io::Error| ServerError::DataDirectory {
        path: path.to_path_buf(),
        source,
    };

    tokio::fs::create_dir_all(path).await.map_err(usable)?;

    let probe = path.join(WRITE_PROBE);
    tokio::fs::write(&probe, b"").await.map_err(usable)?;
    tokio::fs::remove_file(&probe).await.map_err(usable)?;
    Ok(())
}
