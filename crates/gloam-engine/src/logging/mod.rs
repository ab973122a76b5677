//! Logging utilities.
//!
//! Logger initialization plus the shared verbosity knob. Everything logs
//! through the standard `log` facade; `env_logger` is only the default sink.

mod init;
mod verbosity;

pub use init::{LoggingConfig, init_logging};
pub use verbosity::{level_for, raise_verbosity, verbosity};
