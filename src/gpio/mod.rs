//! Exclusive ownership of one digital output line.
//!
//! Three interchangeable back-ends implement [`GpioResource`]: the legacy
//! sysfs export interface and the two generations of the GPIO character
//! device uAPI. [`LineGuard`] wraps whichever one is selected and makes
//! sure the line is handed back on every exit path.

mod cdev_v1;
mod cdev_v2;
mod error;
mod guard;
mod sysfs;

pub use cdev_v1::CdevV1Gpio;
pub use cdev_v2::CdevV2Gpio;
pub use error::GpioError;
pub use guard::LineGuard;
pub use sysfs::{SYSFS_GPIO_ROOT, SysfsGpio, SysfsLine};

/// Exclusively own one output line.
///
/// `acquire` marks the line as owned by this process and configures it as an
/// output driven to the active level. `release` consumes the handle, so a
/// handle can never be released twice.
pub trait GpioResource {
    /// Ownership token for an acquired line
    type Handle;

    /// Human readable line description for log output
    fn describe(&self) -> String;

    /// Take ownership of the line and configure it as an output.
    ///
    /// # Errors
    /// Returns error if the line is owned by another consumer, the caller
    /// lacks permission or the line does not exist.
    fn acquire(&mut self) -> Result<Self::Handle, GpioError>;

    /// Drive the line to the active (`true`) or inactive (`false`) level.
    ///
    /// # Errors
    /// Returns error if the hardware write fails.
    fn set(&mut self, handle: &mut Self::Handle, active: bool) -> Result<(), GpioError>;

    /// Relinquish ownership so other consumers may acquire the line.
    ///
    /// # Errors
    /// Returns error if the line could not be handed back.
    fn release(&mut self, handle: Self::Handle) -> Result<(), GpioError>;
}
