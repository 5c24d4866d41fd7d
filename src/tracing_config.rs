use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{GeneralConfig, LogFormat, LogLevel};

/// Environment variable overriding the configured log format
pub const LOG_FORMAT_ENV: &str = "PASUSPEND_GPIO_LOG_FORMAT";

/// Initialize tracing for the daemon
///
/// Logs go to standard error. `RUST_LOG` takes precedence over the
/// configured level; `quiet` lowers the configured level to warnings.
/// The format comes from `PASUSPEND_GPIO_LOG_FORMAT` if set, otherwise
/// from the configuration.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(general: &GeneralConfig, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(general.log_level, quiet)));

    let registry = tracing_subscriber::registry().with(env_filter);

    let from_env = env::var(LOG_FORMAT_ENV).ok();
    match resolve_format(from_env.as_deref(), general.log_format) {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Compact => {
            registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

fn default_directive(level: LogLevel, quiet: bool) -> String {
    if quiet {
        LogLevel::Warn.to_string()
    } else {
        level.to_string()
    }
}

fn resolve_format(from_env: Option<&str>, configured: LogFormat) -> LogFormat {
    from_env
        .and_then(LogFormat::from_name)
        .unwrap_or(configured)
}
