use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use super::{Config, ConfigError, ConfigPaths};

impl Config {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or does not match the schema
    pub fn from_toml(content: &str, origin: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: origin.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// Load the configuration file at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `explicit` if given, otherwise the default file if it exists
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    ///
    /// # Errors
    /// Returns an error if the selected file cannot be read or parsed
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let Ok(path) = ConfigPaths::main_config() else {
            return Ok(Config::default());
        };

        match Self::load(&path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Config::default())
            }
            result => result,
        }
    }
}
