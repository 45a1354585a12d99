//! Library entry point for presto-cli components.
//!
//! Exposes the formatter, session and config modules so tests can exercise
//! them without going through the `prq` binary.

pub mod config;
pub mod error;
pub mod formatter;
pub mod session;

pub use config::CLIConfiguration;
pub use error::{CLIError, Result};
pub use formatter::{OutputFormat, OutputFormatter};
pub use session::CLISession;
