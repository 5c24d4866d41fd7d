use tracing::{info, warn};

use super::{GpioError, GpioResource};

/// Scoped ownership of an acquired line.
///
/// The handle lives here between a successful `acquire` and the single
/// `release`. Dropping a guard that still holds the line releases it.
pub struct LineGuard<G: GpioResource> {
    backend: G,
    handle: Option<G::Handle>,
}

impl<G: GpioResource> LineGuard<G> {
    /// Acquire the line owned by `backend`.
    ///
    /// # Errors
    /// Returns the backend's acquisition error; nothing is held in that case.
    pub fn acquire(mut backend: G) -> Result<Self, GpioError> {
        let handle = backend.acquire()?;
        info!(line = %backend.describe(), "Acquired GPIO line");
        Ok(Self {
            backend,
            handle: Some(handle),
        })
    }

    /// Drive the held line active or inactive.
    ///
    /// # Errors
    /// Returns [`GpioError::NotHeld`] after release, or the backend's write error.
    pub fn set(&mut self, active: bool) -> Result<(), GpioError> {
        let handle = self.handle.as_mut().ok_or(GpioError::NotHeld)?;
        self.backend.set(handle, active)
    }

    /// Release the line. Calling this again is a no-op.
    ///
    /// # Errors
    /// Returns the backend's release error.
    pub fn release(&mut self) -> Result<(), GpioError> {
        match self.handle.take() {
            Some(handle) => {
                self.backend.release(handle)?;
                info!(line = %self.backend.describe(), "Released GPIO line");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Whether the line is still owned
    pub fn is_held(&self) -> bool {
        self.handle.is_some()
    }
}

impl<G: GpioResource> Drop for LineGuard<G> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "Failed to release GPIO line on drop");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::{LineCall, RecordingGpio};

    #[test]
    fn acquire_then_release_leaves_nothing_held() {
        let gpio = RecordingGpio::new();
        let mut guard = LineGuard::acquire(gpio.clone()).unwrap();
        assert!(guard.is_held());

        guard.release().unwrap();

        assert!(!guard.is_held());
        assert_eq!(gpio.calls(), vec![LineCall::Acquire, LineCall::Release]);
        assert!(!gpio.is_owned());
    }

    #[test]
    fn second_release_is_a_noop() {
        let gpio = RecordingGpio::new();
        let mut guard = LineGuard::acquire(gpio.clone()).unwrap();

        guard.release().unwrap();
        guard.release().unwrap();
        drop(guard);

        assert_eq!(gpio.release_count(), 1);
    }

    #[test]
    fn set_after_release_is_rejected() {
        let gpio = RecordingGpio::new();
        let mut guard = LineGuard::acquire(gpio.clone()).unwrap();
        guard.release().unwrap();

        assert!(matches!(guard.set(true), Err(GpioError::NotHeld)));
        assert!(gpio.writes().is_empty());
    }

    #[test]
    fn drop_releases_held_line() {
        let gpio = RecordingGpio::new();
        {
            let mut guard = LineGuard::acquire(gpio.clone()).unwrap();
            guard.set(false).unwrap();
        }

        assert_eq!(
            gpio.calls(),
            vec![LineCall::Acquire, LineCall::Set(false), LineCall::Release]
        );
    }

    #[test]
    fn failed_acquire_holds_nothing() {
        let gpio = RecordingGpio::busy();

        assert!(LineGuard::acquire(gpio.clone()).is_err());
        assert_eq!(gpio.release_count(), 0);
    }
}
