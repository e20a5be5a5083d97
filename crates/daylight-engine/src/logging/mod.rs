//! Logging setup.
//!
//! Everything logs through the `log` facade; this module only installs the
//! `env_logger` backend once at startup.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
