//! pasuspend-gpio - mirror the suspend state of a PulseAudio sink onto a GPIO line.
//!
//! The daemon owns one output line for its whole lifetime. While the watched
//! sink is running or idle the line is driven active; when the server
//! suspends the sink the line goes inactive, typically powering down an
//! external amplifier. On every exit path the line is driven active again and
//! handed back to the kernel.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pasuspend_gpio::{
//!     gpio::SysfsGpio, services::pulse::PulseConnector, shutdown::ShutdownController,
//!     supervisor::Supervisor,
//! };
//!
//! # async fn run() -> pasuspend_gpio::Result<()> {
//! Supervisor::new(SysfsGpio::new(17), "alsa_output.analog-stereo")
//!     .run(PulseConnector::new("pasuspend-gpio", None), ShutdownController::with_signals())
//!     .await
//! # }
//! ```

/// Command-line interface.
pub mod cli;

/// Optional TOML configuration.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Audio device domain types.
pub mod device;

/// GPIO line ownership and back-ends.
pub mod gpio;

/// Audio server integrations.
pub mod services;

/// Signal-driven shutdown.
pub mod shutdown;

/// Debounced device state to line level mapping.
pub mod state;

/// Startup, event loop and cleanup orchestration.
pub mod supervisor;

/// Logging setup.
pub mod tracing_config;

/// Device tracking over an audio server connection.
pub mod watcher;

#[cfg(test)]
mod test_support;

/// Re-exported core types for convenience.
pub use core::{Result, SuspendGpioError};
