use async_trait::async_trait;
use libpulse_binding::context::{Context, FlagSet as ContextFlags};
use libpulse_tokio::TokioMain;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::device::ConnectionState;
use crate::watcher::{AudioServer, Connector, ServerEvent};

/// Sink queries
pub mod discovery;
/// Error types
pub mod error;
/// Subscription and state callbacks
pub mod events;
/// Channel types shared by the callbacks
pub mod types;

pub use error::PulseError;
pub use types::{EventSender, RawEvent};

use types::EventReceiver;

/// Opens a PulseAudio connection driven by a tokio mainloop
#[derive(Debug, Clone)]
pub struct PulseConnector {
    client_name: String,
    server: Option<String>,
}

impl PulseConnector {
    /// Connect as `client_name` to `server`, or to the default server when `None`
    pub fn new(client_name: impl Into<String>, server: Option<String>) -> Self {
        Self {
            client_name: client_name.into(),
            server,
        }
    }
}

impl Connector for PulseConnector {
    type Server = PulseConnection;

    #[instrument(skip(self), fields(server = ?self.server))]
    fn connect(self) -> Result<PulseConnection, PulseError> {
        let mainloop = TokioMain::new();
        let mut context =
            Context::new(&mainloop, &self.client_name).ok_or(PulseError::ContextCreation)?;

        let (events_tx, events) = mpsc::unbounded_channel();
        events::watch_context_state(&mut context, &events_tx);

        context
            .connect(self.server.as_deref(), ContextFlags::NOFLAGS, None)
            .map_err(|e| {
                PulseError::ConnectionFailed(format!("pa_context_connect() failed: {e}"))
            })?;
        debug!("Connecting to PulseAudio");

        Ok(PulseConnection {
            context,
            mainloop,
            events,
            events_tx,
            last_state: None,
            connected: true,
        })
    }
}

/// Live PulseAudio connection.
///
/// Callbacks fire while the mainloop is pumped from [`AudioServer::next_event`]
/// and are delivered in the order libpulse dispatched them.
pub struct PulseConnection {
    context: Context,
    mainloop: TokioMain,
    events: EventReceiver,
    events_tx: EventSender,
    last_state: Option<ConnectionState>,
    connected: bool,
}

#[async_trait(?Send)]
impl AudioServer for PulseConnection {
    async fn next_event(&mut self) -> Option<ServerEvent> {
        loop {
            let raw = tokio::select! {
                biased;
                raw = self.events.recv() => raw?,
                retval = self.mainloop.run() => {
                    return Some(ServerEvent::LoopQuit(retval.0));
                }
            };

            match raw {
                RawEvent::StateChanged => {
                    let state = ConnectionState::from(self.context.get_state());
                    if let Some(event) = connection_change(&mut self.last_state, state) {
                        return Some(event);
                    }
                }
                RawEvent::Server(event) => return Some(event),
            }
        }
    }

    fn subscribe_devices(&mut self) {
        events::subscribe_sink_events(&mut self.context, &self.events_tx);
    }

    fn query_device(&mut self, name: &str) {
        discovery::query_sink(&self.context, name, &self.events_tx);
    }

    fn failure_reason(&self) -> String {
        format!("{}", self.context.errno())
    }

    fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            self.context.disconnect();
            debug!("Disconnected from PulseAudio");
        }
    }
}

/// The state callback fires on every transition, including repeats of the
/// collapsed states; only report actual changes.
fn connection_change(
    last: &mut Option<ConnectionState>,
    state: ConnectionState,
) -> Option<ServerEvent> {
    (last.replace(state) != Some(state)).then_some(ServerEvent::Connection(state))
}
