use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::gpio::GpioError;
use crate::services::pulse::PulseError;

/// Top-level error for the daemon.
///
/// Every variant is fatal: the supervisor runs its cleanup sequence and the
/// process exits with status 1.
#[derive(Error, Debug)]
pub enum SuspendGpioError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GPIO line could not be acquired, written or released
    #[error(transparent)]
    Gpio(#[from] GpioError),

    /// Audio server connection or protocol failure
    #[error(transparent)]
    Pulse(#[from] PulseError),

    /// Signal handlers could not be registered
    #[error("failed to register signal handlers: {0}")]
    Signal(#[source] io::Error),

    /// Runtime setup failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for daemon operations.
pub type Result<T> = std::result::Result<T, SuspendGpioError>;
