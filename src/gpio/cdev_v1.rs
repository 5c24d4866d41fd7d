use std::path::PathBuf;

use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use tracing::debug;

use super::{GpioError, GpioResource};

/// GPIO line requested through the v1 character device uAPI
#[derive(Debug, Clone)]
pub struct CdevV1Gpio {
    chip: PathBuf,
    offset: u32,
    consumer: String,
}

impl CdevV1Gpio {
    /// Line `offset` on `chip`, labelled with `consumer` while held
    pub fn new(chip: impl Into<PathBuf>, offset: u32, consumer: impl Into<String>) -> Self {
        Self {
            chip: chip.into(),
            offset,
            consumer: consumer.into(),
        }
    }
}

impl GpioResource for CdevV1Gpio {
    type Handle = LineHandle;

    fn describe(&self) -> String {
        format!("{}:{} (uAPI v1)", self.chip.display(), self.offset)
    }

    fn acquire(&mut self) -> Result<LineHandle, GpioError> {
        let mut chip =
            Chip::new(&self.chip).map_err(|e| GpioError::chardev("open chip", &self.chip, e))?;
        let handle = chip
            .get_line(self.offset)
            .and_then(|line| line.request(LineRequestFlags::OUTPUT, 1, &self.consumer))
            .map_err(|e| GpioError::chardev("request line", &self.chip, e))?;

        debug!(line = %self.describe(), "Requested GPIO line");
        Ok(handle)
    }

    fn set(&mut self, handle: &mut LineHandle, active: bool) -> Result<(), GpioError> {
        handle
            .set_value(u8::from(active))
            .map_err(|e| GpioError::chardev("set value", &self.chip, e))
    }

    fn release(&mut self, handle: LineHandle) -> Result<(), GpioError> {
        // closing the request fd releases the line
        drop(handle);
        Ok(())
    }
}
