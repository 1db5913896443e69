//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     LaunchConfig → ObjectServer::start → Outcome (+ one log record)
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → entry point stops the started server
//! ```

pub mod signals;
pub mod startup;

pub use startup::{launch, Outcome};
