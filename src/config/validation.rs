//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values. Returns every problem
//! found, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::LauncherConfig;

/// A single semantic problem in `launcher.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.listen_address {0:?} is not a socket address")]
    ListenAddress(String),

    #[error("data.directory must not be empty")]
    EmptyDataDirectory,

    #[error("logging.file.path must not be empty")]
    EmptyLogPath,

    #[error("license.env must name a variable when license.path is unset")]
    NoLicenseSource,
}

pub fn validate_config(config: &LauncherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.listen_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::ListenAddress(
            config.server.listen_address.clone(),
        ));
    }

    if config.data.directory.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataDirectory);
    }

    if config.logging.file.enabled && config.logging.file.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLogPath);
    }

    if config.license.path.is_none() && config.license.env.trim().is_empty() {
        errors.push(ValidationError::NoLicenseSource);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
