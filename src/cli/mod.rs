//! Command-line interface.
//!
//! One subcommand per GPIO back-end; they differ only in how the line is
//! named. Help output and missing arguments are not errors: usage goes to
//! standard error and the process exits successfully.

use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, error::ErrorKind};

#[cfg(test)]
mod tests;

/// Mirror the suspend state of a PulseAudio sink onto a GPIO line
#[derive(Parser, Debug)]
#[command(name = "pasuspend-gpio")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/pasuspend-gpio/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// GPIO interface driving the line
    #[command(subcommand)]
    pub backend: Backend,
}

/// GPIO interface selection
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Legacy sysfs interface (/sys/class/gpio)
    Sysfs {
        /// GPIO number
        gpio: u32,
        /// Sink to watch
        sink: String,
        /// PulseAudio server (default: platform default)
        server: Option<String>,
    },

    /// Character device, uAPI v1
    #[command(name = "cdev-v1")]
    CdevV1 {
        /// GPIO chip device (e.g. /dev/gpiochip0)
        chip: PathBuf,
        /// Line offset on the chip
        gpio: u32,
        /// Sink to watch
        sink: String,
        /// PulseAudio server (default: platform default)
        server: Option<String>,
    },

    /// Character device, uAPI v2
    #[command(name = "cdev-v2")]
    CdevV2 {
        /// GPIO chip device (e.g. /dev/gpiochip0)
        chip: PathBuf,
        /// Line offset on the chip
        gpio: u32,
        /// Sink to watch
        sink: String,
        /// PulseAudio server (default: platform default)
        server: Option<String>,
    },
}

impl Backend {
    /// Name of the watched sink
    pub fn sink(&self) -> &str {
        match self {
            Backend::Sysfs { sink, .. }
            | Backend::CdevV1 { sink, .. }
            | Backend::CdevV2 { sink, .. } => sink,
        }
    }

    /// Server given on the command line, if any
    pub fn server(&self) -> Option<&str> {
        match self {
            Backend::Sysfs { server, .. }
            | Backend::CdevV1 { server, .. }
            | Backend::CdevV2 { server, .. } => server.as_deref(),
        }
    }
}

/// Parse failure that ends the process before the daemon starts
#[derive(Debug)]
pub struct CliExit {
    /// Text for standard error
    pub message: String,
    /// Whether the exit counts as success
    pub success: bool,
}

impl CliExit {
    /// Process exit status: 0 for usage output, 1 for malformed arguments
    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    /// Parse `args`, the first item being the program name.
    ///
    /// # Errors
    /// Returns the usage or error text and exit status when the daemon
    /// should not start.
    pub fn parse_args<I, T>(args: I) -> Result<Cli, CliExit>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map_err(|err| {
            let success = matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                    | ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
            );
            CliExit {
                message: err.render().to_string(),
                success,
            }
        })
    }
}
