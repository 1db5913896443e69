//! Shared utilities for launcher integration tests.

#![allow(dead_code)]

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use sync_launcher::config::{LaunchConfig, LicenseMaterial};
use sync_launcher::server::{ObjectServer, Started, StartupFailure};

/// One captured log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
}

/// Collects every event emitted while installed as the default subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CapturedLogs {
    /// Install as the thread's default subscriber until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.records.lock().unwrap().push(Record {
            level: *event.metadata().level(),
            message: visitor.message,
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

/// Server fake that settles with a fixed result and counts calls.
pub struct FakeServer {
    result: Result<Started, StartupFailure>,
    pub calls: usize,
    pub received: Option<LaunchConfig>,
}

impl FakeServer {
    pub fn succeeding(address: &str) -> Self {
        Self {
            result: Ok(Started::new(address)),
            calls: 0,
            received: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(StartupFailure::new(message)),
            calls: 0,
            received: None,
        }
    }
}

impl ObjectServer for FakeServer {
    async fn start(&mut self, config: LaunchConfig) -> Result<Started, StartupFailure> {
        self.calls += 1;
        self.received = Some(config);
        self.result.clone()
    }
}

/// Server fake whose start never settles.
pub struct PendingServer;

impl ObjectServer for PendingServer {
    async fn start(&mut self, _config: LaunchConfig) -> Result<Started, StartupFailure> {
        std::future::pending().await
    }
}

/// Config rooted at `base`, listening on `listen_address`.
pub fn config_at(base: &Path, listen_address: &str, license: &str) -> LaunchConfig {
    let mut config = LaunchConfig::new(base, LicenseMaterial::new(license));
    config.listen_address = listen_address.to_string();
    config
}
