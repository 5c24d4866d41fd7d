use std::{io, path::PathBuf};

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid TOML or does not match the schema
    #[error("failed to parse TOML at '{path}': {details}")]
    TomlParse {
        /// File that was parsed
        path: PathBuf,
        /// Parser message
        details: String,
    },

    /// Neither XDG_CONFIG_HOME nor HOME is set
    #[error("neither XDG_CONFIG_HOME nor HOME environment variable found")]
    NoConfigDir,
}
