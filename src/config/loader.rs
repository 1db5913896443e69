//! Configuration loading and resolution.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{
    ConsoleSinkConfig, FileSinkConfig, LaunchConfig, LauncherConfig, LicenseMaterial,
    LogSinkConfig,
};
use crate::config::validation::{validate_config, ValidationError};

/// Name of the configuration file looked up in the base directory.
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate launcher directory: {0}")]
    BaseDirectory(#[source] io::Error),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("no license: environment variable {0} is not set")]
    MissingLicense(String),

    #[error("license material is empty")]
    EmptyLicense,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Directory the launcher is installed in.
///
/// The executable is expected under `<base>/bin/`, so this is the parent of
/// the executable's directory. An executable sitting at a filesystem root
/// uses its own directory.
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::BaseDirectory)?;
    let exe_dir = exe.parent().ok_or_else(|| {
        ConfigError::BaseDirectory(io::Error::new(
            io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })?;
    Ok(exe_dir.parent().unwrap_or(exe_dir).to_path_buf())
}

/// Load and validate `launcher.toml`. A missing file yields defaults.
pub fn load_file(path: &Path) -> Result<LauncherConfig, ConfigError> {
    let config: LauncherConfig = match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            LauncherConfig::default()
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the launch configuration for an install rooted at `base_dir`,
/// reading the license from the process environment.
pub fn load(base_dir: &Path) -> Result<LaunchConfig, ConfigError> {
    let config = load_file(&base_dir.join(CONFIG_FILE_NAME))?;
    resolve(config, base_dir, |name| std::env::var(name).ok())
}

/// Turn file settings into a [`LaunchConfig`].
///
/// `lookup_env` supplies environment variables so callers control where the
/// license comes from.
pub fn resolve<F>(
    config: LauncherConfig,
    base_dir: &Path,
    lookup_env: F,
) -> Result<LaunchConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let license = read_license(&config, base_dir, lookup_env)?;

    let file = config.logging.file;
    let console = config.logging.console;
    let log_sink = LogSinkConfig {
        file: file.enabled.then(|| FileSinkConfig {
            path: rooted(base_dir, &file.path),
            level: file.level,
            timestamp: file.timestamp,
        }),
        console: console.enabled.then_some(ConsoleSinkConfig {
            level: console.level,
        }),
    };

    Ok(LaunchConfig {
        data_directory: rooted(base_dir, &config.data.directory),
        log_sink,
        license,
        listen_address: config.server.listen_address,
    })
}

fn read_license<F>(
    config: &LauncherConfig,
    base_dir: &Path,
    lookup_env: F,
) -> Result<LicenseMaterial, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match &config.license.path {
        Some(path) => {
            let path = rooted(base_dir, path);
            fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?
        }
        None => lookup_env(&config.license.env)
            .ok_or_else(|| ConfigError::MissingLicense(config.license.env.clone()))?,
    };

    let token = raw.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyLicense);
    }
    Ok(LicenseMaterial::new(token))
}

fn rooted(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
