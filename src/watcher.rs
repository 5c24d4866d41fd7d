//! Subscribe-then-query tracking of one named device.
//!
//! The server's change notifications only say that *something* about a
//! device changed, so every relevant notification is answered with a fresh
//! query by name and the query result carries the new state.

use async_trait::async_trait;
use tracing::{debug, info, trace, warn};

use crate::device::{ConnectionState, DeviceIdentity, DeviceIndex, DeviceObservation, DeviceState};
use crate::services::pulse::PulseError;

/// Events delivered by an audio server connection, in transport order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Connection lifecycle changed
    Connection(ConnectionState),
    /// Reply to the device subscription request
    Subscribed {
        /// Whether the server accepted the subscription
        success: bool,
    },
    /// A device of the subscribed category changed
    DeviceChanged {
        /// Index of the changed device
        index: DeviceIndex,
    },
    /// Result of a device query
    DeviceInfo(DeviceObservation),
    /// A device query found no device with the requested name
    DeviceMissing,
    /// The server's event loop was asked to quit with this status
    LoopQuit(i32),
}

/// Connection to an audio server, driven from a single thread
#[async_trait(?Send)]
pub trait AudioServer {
    /// Pump the connection until the next event is available.
    ///
    /// Returns `None` once the connection can produce no further events.
    async fn next_event(&mut self) -> Option<ServerEvent>;

    /// Subscribe to change notifications for output devices
    fn subscribe_devices(&mut self);

    /// Query the named device; the result arrives as a later event
    fn query_device(&mut self, name: &str);

    /// Server-provided description of the last failure
    fn failure_reason(&self) -> String;

    /// Close the connection
    fn disconnect(&mut self);
}

/// Opens an [`AudioServer`] connection
pub trait Connector {
    /// Connection type produced
    type Server: AudioServer;

    /// Create the connection and start connecting.
    ///
    /// # Errors
    /// Returns error if the connection could not be started.
    fn connect(self) -> Result<Self::Server, PulseError>;
}

/// Outcome of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    /// Keep processing events
    Continue,
    /// Device state observed; feed it to the state machine
    Observed(DeviceState),
    /// Connection ended cleanly
    Stop,
}

/// Tracks one named device through a subscription
#[derive(Debug)]
pub struct DeviceWatcher {
    device: DeviceIdentity,
    subscribing: bool,
}

impl DeviceWatcher {
    /// Watch the device named in `device`
    pub fn new(device: DeviceIdentity) -> Self {
        Self {
            device,
            subscribing: false,
        }
    }

    /// Identity of the watched device
    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    /// Handle one server event, issuing follow-up requests on `server`.
    ///
    /// # Errors
    /// Returns error if the connection failed or the subscription was rejected.
    pub fn handle<S: AudioServer + ?Sized>(
        &mut self,
        event: ServerEvent,
        server: &mut S,
    ) -> Result<Watch, PulseError> {
        match event {
            ServerEvent::Connection(state) => self.on_connection(state, server),
            ServerEvent::Subscribed { success } => {
                self.on_subscribed(success, server)?;
                Ok(Watch::Continue)
            }
            ServerEvent::DeviceChanged { index } => {
                self.on_device_changed(index, server);
                Ok(Watch::Continue)
            }
            ServerEvent::DeviceInfo(observation) => {
                Ok(Watch::Observed(self.on_device_info(&observation)))
            }
            ServerEvent::DeviceMissing => {
                warn!(device = self.device.name(), "Device not found");
                Ok(Watch::Continue)
            }
            ServerEvent::LoopQuit(0) => Ok(Watch::Stop),
            ServerEvent::LoopQuit(code) => Err(PulseError::LoopQuit(code)),
        }
    }

    fn on_connection<S: AudioServer + ?Sized>(
        &mut self,
        state: ConnectionState,
        server: &mut S,
    ) -> Result<Watch, PulseError> {
        match state {
            ConnectionState::Connecting => Ok(Watch::Continue),
            ConnectionState::Ready => {
                info!("Connection established");
                if !self.subscribing {
                    self.subscribing = true;
                    server.subscribe_devices();
                }
                Ok(Watch::Continue)
            }
            ConnectionState::Terminated => {
                info!("Connection terminated by server");
                Ok(Watch::Stop)
            }
            ConnectionState::Failed => Err(PulseError::ConnectionFailed(server.failure_reason())),
        }
    }

    fn on_subscribed<S: AudioServer + ?Sized>(
        &mut self,
        success: bool,
        server: &mut S,
    ) -> Result<(), PulseError> {
        if !success {
            return Err(PulseError::SubscriptionRejected);
        }
        info!("Subscribed to sink events");
        server.query_device(self.device.name());
        Ok(())
    }

    fn on_device_changed<S: AudioServer + ?Sized>(&mut self, index: DeviceIndex, server: &mut S) {
        if !self.device.matches(index) {
            trace!(%index, "Ignoring event for other device");
            return;
        }
        server.query_device(self.device.name());
    }

    fn on_device_info(&mut self, observation: &DeviceObservation) -> DeviceState {
        if !self.device.resolve(observation.index) {
            debug!(
                reported = %observation.index,
                cached = ?self.device.index(),
                "Device index changed; keeping cached index"
            );
        }
        info!(device = %observation.name, "{}", observation.raw);
        observation.state()
    }
}
