//! Logging utilities.
//!
//! The crate logs through the `log` facade only; this module provides the
//! one-shot `env_logger` setup binaries and tests may opt into.

mod init;

pub use init::{init_logging, LoggingConfig};
