use std::{error::Error, io, path::PathBuf};

/// GPIO line errors
#[derive(thiserror::Error, Debug)]
pub enum GpioError {
    /// sysfs control file could not be written
    #[error("{operation} failed on '{path}': {source}")]
    Io {
        /// Failing operation (export, direction, value, unexport)
        operation: &'static str,
        /// Control file that was written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Character device request failed
    #[error("{operation} failed on '{chip}': {source}")]
    Chardev {
        /// Failing operation (open chip, request line, set value)
        operation: &'static str,
        /// GPIO chip device path
        chip: PathBuf,
        /// Error reported by the uAPI binding
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// Line was written after it had been released
    #[error("GPIO line is not held")]
    NotHeld,
}

impl GpioError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        GpioError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn chardev(
        operation: &'static str,
        chip: impl Into<PathBuf>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        GpioError::Chardev {
            operation,
            chip: chip.into(),
            source: Box::new(source),
        }
    }
}
