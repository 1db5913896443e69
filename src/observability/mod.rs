//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! launcher, server:
//!     → tracing events (severity + message + fields)
//!     → logging.rs (per-destination level filters)
//!     → file destination (non-blocking writer) and console destination
//! ```

pub mod logging;

pub use logging::{init_logging, LoggingError, LoggingGuard};
