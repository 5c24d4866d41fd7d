//! Startup, event loop and the single cleanup path.
//!
//! Startup order: acquire the line, arm signal handlers, connect to the
//! audio server, then process events until shutdown or a fatal error.
//! Whatever happens after the line is acquired, [`Session::close`] runs:
//! drive the line active, release it, disconnect, drop the connection.

use tracing::{info, instrument, warn};

use crate::core::{Result, SuspendGpioError};
use crate::device::{DeviceIdentity, DeviceState};
use crate::gpio::{GpioResource, LineGuard};
use crate::shutdown::ShutdownController;
use crate::state::SuspendStateMachine;
use crate::watcher::{AudioServer, Connector, DeviceWatcher, Watch};

/// Wires the line, the watcher and the shutdown controller together
pub struct Supervisor<G: GpioResource> {
    backend: G,
    device: DeviceIdentity,
}

impl<G: GpioResource> Supervisor<G> {
    /// Mirror the device named `device_name` onto the line owned by `backend`
    pub fn new(backend: G, device_name: impl Into<String>) -> Self {
        Self {
            backend,
            device: DeviceIdentity::new(device_name),
        }
    }

    /// Run until shutdown is requested, the server ends the connection, or a
    /// fatal error occurs.
    ///
    /// # Errors
    /// Returns the first setup, protocol or hardware error. Cleanup has
    /// already run when this returns.
    #[instrument(skip_all, fields(device = self.device.name()))]
    pub async fn run<C: Connector>(
        self,
        connector: C,
        mut shutdown: ShutdownController,
    ) -> Result<()> {
        let line = LineGuard::acquire(self.backend)?;
        let mut session: Session<G, C::Server> =
            Session::new(DeviceWatcher::new(self.device), line);

        let outcome = session.serve(connector, &mut shutdown).await;
        let closed = session.close();

        match (outcome, closed) {
            (Err(e), Err(cleanup)) => {
                warn!(error = %cleanup, "Cleanup failed");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), closed) => closed,
        }
    }
}

struct Session<G: GpioResource, S: AudioServer> {
    watcher: DeviceWatcher,
    machine: SuspendStateMachine,
    line: LineGuard<G>,
    server: Option<S>,
    closed: bool,
}

impl<G: GpioResource, S: AudioServer> Session<G, S> {
    fn new(watcher: DeviceWatcher, line: LineGuard<G>) -> Self {
        Self {
            watcher,
            machine: SuspendStateMachine::new(),
            line,
            server: None,
            closed: false,
        }
    }

    async fn serve<C: Connector<Server = S>>(
        &mut self,
        connector: C,
        shutdown: &mut ShutdownController,
    ) -> Result<()> {
        shutdown.arm().map_err(SuspendGpioError::Signal)?;
        let server = self.server.insert(connector.connect()?);

        loop {
            let event = tokio::select! {
                biased;
                reason = shutdown.requested() => {
                    info!(%reason, "Shutdown requested");
                    return Ok(());
                }
                event = server.next_event() => event,
            };

            let Some(event) = event else {
                info!("Audio server connection closed");
                return Ok(());
            };

            match self.watcher.handle(event, server)? {
                Watch::Continue => {}
                Watch::Observed(state) => {
                    self.machine.apply(state, &mut self.line)?;
                }
                Watch::Stop => return Ok(()),
            }
        }
    }

    /// Drive the line active, release it and close the connection.
    ///
    /// Only the first call does anything.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let forced = if self.line.is_held() {
            self.machine
                .apply(DeviceState::Active, &mut self.line)
                .map(|_| ())
        } else {
            Ok(())
        };
        let released = self.line.release();
        if let (Err(_), Err(e)) = (&forced, &released) {
            warn!(error = %e, "Failed to release GPIO line");
        }

        if let Some(mut server) = self.server.take() {
            server.disconnect();
        }

        forced.and(released)?;
        Ok(())
    }
}

impl<G: GpioResource, S: AudioServer> Drop for Session<G, S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "Cleanup failed");
        }
    }
}
