use std::{fmt, future, io};

use tokio::{
    signal::unix::{Signal, SignalKind, signal},
    sync::watch,
};
use tracing::{debug, info};

/// Why the daemon is shutting down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT received
    Interrupt,
    /// SIGTERM received
    Terminate,
    /// Requested through a [`ShutdownHandle`]
    Requested,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupt => write!(f, "SIGINT"),
            ShutdownReason::Terminate => write!(f, "SIGTERM"),
            ShutdownReason::Requested => write!(f, "shutdown request"),
        }
    }
}

/// Requests shutdown from outside the event loop
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request shutdown.
    ///
    /// Returns `true` only for the first request.
    pub fn request(&self) -> bool {
        self.tx
            .send_if_modified(|requested| !std::mem::replace(requested, true))
    }
}

struct Signals {
    interrupt: Signal,
    terminate: Signal,
    wake: Signal,
}

/// Turns termination signals into a shutdown request.
///
/// SIGINT and SIGTERM stop the event loop. SIGUSR1 only wakes it up and
/// changes nothing.
pub struct ShutdownController {
    tx: watch::Sender<bool>,
    rx: watch::Receiver<bool>,
    listen_for_signals: bool,
    signals: Option<Signals>,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    /// Controller that only reacts to [`ShutdownHandle::request`]
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx,
            rx,
            listen_for_signals: false,
            signals: None,
        }
    }

    /// Controller that also reacts to SIGINT and SIGTERM once armed
    pub fn with_signals() -> Self {
        Self {
            listen_for_signals: true,
            ..Self::new()
        }
    }

    /// Handle for requesting shutdown programmatically
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.tx.clone(),
        }
    }

    /// Register the OS signal handlers, if this controller listens for them.
    ///
    /// Must be called from within a tokio runtime. Arming twice is a no-op.
    ///
    /// # Errors
    /// Returns error if a signal handler could not be registered.
    pub fn arm(&mut self) -> io::Result<()> {
        if !self.listen_for_signals || self.signals.is_some() {
            return Ok(());
        }
        self.signals = Some(Signals {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            wake: signal(SignalKind::user_defined1())?,
        });
        debug!("Signal handlers registered");
        Ok(())
    }

    /// Whether shutdown has been requested through a handle
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until shutdown is requested
    pub async fn requested(&mut self) -> ShutdownReason {
        let Self { rx, signals, .. } = self;
        loop {
            let (interrupt, terminate, wake) = match signals.as_mut() {
                Some(s) => (
                    Some(&mut s.interrupt),
                    Some(&mut s.terminate),
                    Some(&mut s.wake),
                ),
                None => (None, None, None),
            };

            tokio::select! {
                biased;
                _ = rx.wait_for(|requested| *requested) => return ShutdownReason::Requested,
                Some(()) = recv(interrupt) => {
                    info!("Got SIGINT, exiting");
                    return ShutdownReason::Interrupt;
                }
                Some(()) = recv(terminate) => {
                    info!("Got SIGTERM, exiting");
                    return ShutdownReason::Terminate;
                }
                Some(()) = recv(wake) => debug!("Got SIGUSR1, ignoring"),
            }
        }
    }
}

async fn recv(signal: Option<&mut Signal>) -> Option<()> {
    match signal {
        Some(signal) => signal.recv().await,
        None => future::pending().await,
    }
}
