use tracing::debug;

use crate::device::DeviceState;
use crate::gpio::{GpioError, GpioResource, LineGuard};

/// Debounced mapping from device state to line level.
///
/// Only a change to a different known state reaches the hardware, and the
/// new state is committed after the write succeeded.
#[derive(Debug, Default)]
pub struct SuspendStateMachine {
    current: DeviceState,
}

impl SuspendStateMachine {
    /// Start in [`DeviceState::Unknown`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last state written to the line
    pub fn current(&self) -> DeviceState {
        self.current
    }

    /// Apply an observation, writing the line if the state changed.
    ///
    /// Returns whether a hardware write happened.
    ///
    /// # Errors
    /// Returns the line write error; the current state is unchanged then.
    pub fn apply<G: GpioResource>(
        &mut self,
        new: DeviceState,
        line: &mut LineGuard<G>,
    ) -> Result<bool, GpioError> {
        if new == DeviceState::Unknown || new == self.current {
            return Ok(false);
        }

        line.set(new == DeviceState::Active)?;
        debug!(from = ?self.current, to = ?new, "Line updated");
        self.current = new;
        Ok(true)
    }
}
