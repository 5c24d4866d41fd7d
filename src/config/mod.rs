//! Daemon configuration.
//!
//! Everything here is optional: the positional command-line arguments name
//! the line and the device, and the TOML file only tunes logging, the GPIO
//! consumer label and the audio server client.

mod error;
mod general;
mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use general::{GeneralConfig, LogFormat, LogLevel};
pub use paths::ConfigPaths;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gpio::SYSFS_GPIO_ROOT;

/// Default name used as GPIO consumer label and audio client name
pub const DEFAULT_CLIENT_NAME: &str = "pasuspend-gpio";

/// Main configuration structure.
///
/// Every section and field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// GPIO line settings
    #[serde(default)]
    pub gpio: GpioConfig,

    /// Audio server settings
    #[serde(default)]
    pub pulse: PulseConfig,
}

/// GPIO line settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    /// Consumer label shown for character device requests
    pub consumer: String,
    /// Root of the sysfs GPIO class
    pub sysfs_root: PathBuf,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            consumer: DEFAULT_CLIENT_NAME.to_string(),
            sysfs_root: PathBuf::from(SYSFS_GPIO_ROOT),
        }
    }
}

/// Audio server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Client name announced to the server
    pub client_name: String,
    /// Server to connect to instead of the default
    pub server: Option<String>,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            server: None,
        }
    }
}
