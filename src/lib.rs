//! Object server launcher library.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod server;

pub use config::LaunchConfig;
pub use lifecycle::{launch, Outcome};
pub use server::{BasicServer, ObjectServer, Started, StartupFailure};
