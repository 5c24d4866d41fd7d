use std::path::PathBuf;

use gpiocdev::{Request, line::Value};
use tracing::debug;

use super::{GpioError, GpioResource};

/// GPIO line requested through the v2 character device uAPI
#[derive(Debug, Clone)]
pub struct CdevV2Gpio {
    chip: PathBuf,
    offset: u32,
    consumer: String,
}

impl CdevV2Gpio {
    /// Line `offset` on `chip`, labelled with `consumer` while held
    pub fn new(chip: impl Into<PathBuf>, offset: u32, consumer: impl Into<String>) -> Self {
        Self {
            chip: chip.into(),
            offset,
            consumer: consumer.into(),
        }
    }
}

impl GpioResource for CdevV2Gpio {
    type Handle = Request;

    fn describe(&self) -> String {
        format!("{}:{} (uAPI v2)", self.chip.display(), self.offset)
    }

    fn acquire(&mut self) -> Result<Request, GpioError> {
        let request = Request::builder()
            .on_chip(self.chip.clone())
            .with_consumer(self.consumer.as_str())
            .with_line(self.offset)
            .as_output(Value::Active)
            .request()
            .map_err(|e| GpioError::chardev("request line", &self.chip, e))?;

        debug!(line = %self.describe(), "Requested GPIO line");
        Ok(request)
    }

    fn set(&mut self, handle: &mut Request, active: bool) -> Result<(), GpioError> {
        let value = if active {
            Value::Active
        } else {
            Value::Inactive
        };
        handle
            .set_value(self.offset, value)
            .map(|_| ())
            .map_err(|e| GpioError::chardev("set value", &self.chip, e))
    }

    fn release(&mut self, handle: Request) -> Result<(), GpioError> {
        drop(handle);
        Ok(())
    }
}
