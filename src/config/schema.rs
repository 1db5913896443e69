//! Configuration schema definitions.
//!
//! [`LauncherConfig`] mirrors `launcher.toml` as written on disk. It is
//! resolved once into a [`LaunchConfig`], the immutable value handed to the
//! server abstraction.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default address the bundled server binds.
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9080";

/// Default environment variable carrying the license token.
pub const DEFAULT_LICENSE_ENV: &str = "SYNC_LAUNCHER_LICENSE";

/// Root of `launcher.toml`.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LauncherConfig {
    /// Server abstraction settings.
    pub server: ServerSection,

    /// Data directory settings.
    pub data: DataSection,

    /// Log destinations.
    pub logging: LoggingSection,

    /// Where the license token comes from.
    pub license: LicenseSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address (e.g., "0.0.0.0:9080").
    pub listen_address: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSection {
    /// Data directory. Relative paths resolve against the base directory.
    pub directory: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
        }
    }
}

/// Log destinations as written in the file.
///
/// A destination that is omitted from the file keeps its default; set
/// `enabled = false` to switch one off.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub file: FileSection,
    pub console: ConsoleSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileSection {
    pub enabled: bool,

    /// Log file path. Relative paths resolve against the base directory.
    pub path: PathBuf,

    /// Minimum severity written to the file.
    pub level: Severity,

    /// Prefix each record with a timestamp.
    pub timestamp: bool,
}

impl Default for FileSection {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("log.txt"),
            level: Severity::Debug,
            timestamp: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleSection {
    pub enabled: bool,

    /// Minimum severity written to the console.
    pub level: Severity,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: Severity::Info,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LicenseSection {
    /// Environment variable holding the token.
    pub env: String,

    /// File holding the token. Takes precedence over `env` when set.
    pub path: Option<PathBuf>,
}

impl Default for LicenseSection {
    fn default() -> Self {
        Self {
            env: DEFAULT_LICENSE_ENV.to_string(),
            path: None,
        }
    }
}

/// Minimum severity for a log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "all")]
    Trace,
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }
}

/// Resolved startup configuration handed to the server abstraction.
///
/// Built once by [`crate::config::loader`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Absolute data directory. Created by the server if missing.
    pub data_directory: PathBuf,

    /// Where operational logs go.
    pub log_sink: LogSinkConfig,

    /// Opaque credential, forwarded unmodified.
    pub license: LicenseMaterial,

    /// Address the server should bind.
    pub listen_address: String,
}

impl LaunchConfig {
    /// Config with default sections rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, license: LicenseMaterial) -> Self {
        let base_dir = base_dir.into();
        Self {
            data_directory: base_dir.join("data"),
            log_sink: LogSinkConfig {
                file: Some(FileSinkConfig {
                    path: base_dir.join("log.txt"),
                    level: Severity::Debug,
                    timestamp: true,
                }),
                console: Some(ConsoleSinkConfig {
                    level: Severity::Info,
                }),
            },
            license,
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
        }
    }
}

/// Resolved log destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSinkConfig {
    pub file: Option<FileSinkConfig>,
    pub console: Option<ConsoleSinkConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    pub level: Severity,
    pub timestamp: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSinkConfig {
    pub level: Severity,
}

/// License token. Never parsed; `Debug` does not reveal it.
#[derive(Clone, PartialEq, Eq)]
pub struct LicenseMaterial(String);

impl LicenseMaterial {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for LicenseMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LicenseMaterial(<{} bytes>)", self.0.len())
    }
}
