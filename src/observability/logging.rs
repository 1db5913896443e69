//! Structured logging.
//!
//! # Responsibilities
//! - Build one `fmt` layer per configured destination
//! - Apply each destination's minimum severity
//! - Keep the non-blocking file writer alive for the process lifetime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - The file destination never uses ANSI colors
//! - Levels come from `launcher.toml`; `RUST_LOG` is not consulted

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer, Registry,
};

use crate::config::{FileSinkConfig, LogSinkConfig, Severity};

/// A type-erased destination layer.
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Chatty dependencies are capped regardless of destination level.
const QUIET_TARGETS: &[&str] = &["hyper=warn", "h2=warn"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log file path {} has no file name", .0.display())]
    InvalidLogPath(PathBuf),

    #[error("cannot create log directory {}: {source}", path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Flushes buffered file output when dropped. Hold it until exit.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber for `sink`.
pub fn init_logging(sink: &LogSinkConfig) -> Result<LoggingGuard, LoggingError> {
    let (layers, guard) = build_layers(sink)?;
    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(guard)
}

/// Layers for every enabled destination, without installing them.
pub fn build_layers(sink: &LogSinkConfig) -> Result<(Vec<BoxedLayer>, LoggingGuard), LoggingError> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut file_guard = None;

    if let Some(file) = &sink.file {
        let (layer, guard) = file_layer(file)?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    if let Some(console) = &sink.console {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stdout)
                .with_filter(level_filter(console.level))
                .boxed(),
        );
    }

    Ok((layers, LoggingGuard { _file: file_guard }))
}

fn file_layer(file: &FileSinkConfig) -> Result<(BoxedLayer, WorkerGuard), LoggingError> {
    let name = file
        .path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidLogPath(file.path.clone()))?;
    let dir = match file.path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|source| LoggingError::LogDirectory {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);
    let layer: BoxedLayer = if file.timestamp {
        layer.with_filter(level_filter(file.level)).boxed()
    } else {
        layer
            .without_time()
            .with_filter(level_filter(file.level))
            .boxed()
    };

    Ok((layer, guard))
}

fn level_filter(level: Severity) -> EnvFilter {
    EnvFilter::new(filter_directive(level))
}

fn filter_directive(level: Severity) -> String {
    let mut directive = level.as_str().to_string();
    for target in QUIET_TARGETS {
        directive.push(',');
        directive.push_str(target);
    }
    directive
}
