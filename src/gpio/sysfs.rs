use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::{GpioError, GpioResource};

/// Default mount point of the sysfs GPIO class
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// GPIO line driven through the sysfs export interface
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
    number: u32,
}

/// An exported sysfs line
#[derive(Debug)]
pub struct SysfsLine {
    value: PathBuf,
}

impl SysfsGpio {
    /// Line `number` under the standard sysfs root
    pub fn new(number: u32) -> Self {
        Self::with_root(SYSFS_GPIO_ROOT, number)
    }

    /// Line `number` under a custom sysfs root
    pub fn with_root(root: impl Into<PathBuf>, number: u32) -> Self {
        Self {
            root: root.into(),
            number,
        }
    }

    fn line_dir(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.number))
    }

    fn unexport(&self) -> Result<(), GpioError> {
        let number = self.number.to_string();
        write_control("unexport", &self.root.join("unexport"), &number)
    }
}

impl GpioResource for SysfsGpio {
    type Handle = SysfsLine;

    fn describe(&self) -> String {
        format!("gpio{} ({})", self.number, self.root.display())
    }

    fn acquire(&mut self) -> Result<SysfsLine, GpioError> {
        let number = self.number.to_string();
        write_control("export", &self.root.join("export"), &number)?;

        let line_dir = self.line_dir();
        // "high" selects output and sets the level in one write
        if let Err(err) = write_control("direction", &line_dir.join("direction"), "high") {
            if let Err(unexport_err) = self.unexport() {
                warn!(error = %unexport_err, "Failed to unexport partially configured line");
            }
            return Err(err);
        }

        debug!(line = %line_dir.display(), "Exported GPIO line");
        Ok(SysfsLine {
            value: line_dir.join("value"),
        })
    }

    fn set(&mut self, handle: &mut SysfsLine, active: bool) -> Result<(), GpioError> {
        write_control("value", &handle.value, if active { "1" } else { "0" })
    }

    fn release(&mut self, _handle: SysfsLine) -> Result<(), GpioError> {
        self.unexport()
    }
}

fn write_control(operation: &'static str, path: &Path, value: &str) -> Result<(), GpioError> {
    fs::write(path, format!("{value}\n")).map_err(|e| GpioError::io(operation, path, e))
}
