//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! launcher.toml (optional)
//!     → loader.rs (parse & deserialize, default when absent)
//!     → validation.rs (semantic checks)
//!     → loader::resolve (paths rooted at the base dir, license injected)
//!     → LaunchConfig (immutable, moved into the server)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the file can be omitted entirely
//! - The license token is read from a file or the environment, never
//!   embedded in the file itself
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    ConsoleSinkConfig, FileSinkConfig, LaunchConfig, LauncherConfig, LicenseMaterial,
    LogSinkConfig, Severity,
};
