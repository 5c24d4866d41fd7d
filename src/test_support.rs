//! In-memory stand-ins for the GPIO line and the audio server.

use std::{cell::RefCell, collections::VecDeque, future, io, rc::Rc};

use async_trait::async_trait;

use crate::gpio::{GpioError, GpioResource};
use crate::services::pulse::PulseError;
use crate::shutdown::ShutdownHandle;
use crate::watcher::{AudioServer, Connector, ServerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCall {
    Acquire,
    Set(bool),
    Release,
}

#[derive(Debug, Default)]
struct LineState {
    calls: Vec<LineCall>,
    owned: bool,
    busy: bool,
    fail_writes: bool,
}

/// Records every call; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingGpio {
    state: Rc<RefCell<LineState>>,
}

#[derive(Debug)]
pub struct RecordedLine;

impl RecordingGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line already owned by another consumer
    pub fn busy() -> Self {
        let gpio = Self::new();
        gpio.state.borrow_mut().busy = true;
        gpio
    }

    pub fn fail_writes(&self) {
        self.state.borrow_mut().fail_writes = true;
    }

    pub fn calls(&self) -> Vec<LineCall> {
        self.state.borrow().calls.clone()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                LineCall::Set(active) => Some(active),
                _ => None,
            })
            .collect()
    }

    pub fn release_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == LineCall::Release)
            .count()
    }

    pub fn is_owned(&self) -> bool {
        self.state.borrow().owned
    }
}

impl GpioResource for RecordingGpio {
    type Handle = RecordedLine;

    fn describe(&self) -> String {
        "recording line".to_string()
    }

    fn acquire(&mut self) -> Result<RecordedLine, GpioError> {
        let mut state = self.state.borrow_mut();
        if state.busy || state.owned {
            return Err(GpioError::io(
                "export",
                "/sys/class/gpio/export",
                io::Error::from_raw_os_error(16),
            ));
        }
        state.owned = true;
        state.calls.push(LineCall::Acquire);
        Ok(RecordedLine)
    }

    fn set(&mut self, _handle: &mut RecordedLine, active: bool) -> Result<(), GpioError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(GpioError::io(
                "value",
                "/sys/class/gpio/gpio0/value",
                io::Error::from_raw_os_error(5),
            ));
        }
        state.calls.push(LineCall::Set(active));
        Ok(())
    }

    fn release(&mut self, _handle: RecordedLine) -> Result<(), GpioError> {
        let mut state = self.state.borrow_mut();
        state.owned = false;
        state.calls.push(LineCall::Release);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCall {
    Subscribe,
    Query(String),
    Disconnect,
}

#[derive(Debug, Clone, Default)]
pub struct ServerLog(Rc<RefCell<Vec<ServerCall>>>);

impl ServerLog {
    pub fn calls(&self) -> Vec<ServerCall> {
        self.0.borrow().clone()
    }

    fn push(&self, call: ServerCall) {
        self.0.borrow_mut().push(call);
    }
}

/// Replays a fixed event script, then idles.
#[derive(Debug, Default)]
pub struct FakeServer {
    script: VecDeque<ServerEvent>,
    log: ServerLog,
    failure_reason: String,
    on_idle: Option<ShutdownHandle>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(events: impl IntoIterator<Item = ServerEvent>) -> Self {
        Self {
            script: events.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Request shutdown once the script is exhausted
    pub fn shutdown_when_idle(mut self, handle: ShutdownHandle) -> Self {
        self.on_idle = Some(handle);
        self
    }

    pub fn set_failure_reason(&mut self, reason: &str) {
        self.failure_reason = reason.to_string();
    }

    pub fn log(&self) -> ServerLog {
        self.log.clone()
    }

    pub fn calls(&self) -> Vec<ServerCall> {
        self.log.calls()
    }
}

#[async_trait(?Send)]
impl AudioServer for FakeServer {
    async fn next_event(&mut self) -> Option<ServerEvent> {
        if let Some(event) = self.script.pop_front() {
            return Some(event);
        }
        if let Some(handle) = &self.on_idle {
            handle.request();
        }
        future::pending().await
    }

    fn subscribe_devices(&mut self) {
        self.log.push(ServerCall::Subscribe);
    }

    fn query_device(&mut self, name: &str) {
        self.log.push(ServerCall::Query(name.to_string()));
    }

    fn failure_reason(&self) -> String {
        self.failure_reason.clone()
    }

    fn disconnect(&mut self) {
        self.log.push(ServerCall::Disconnect);
    }
}

/// Hands out a prepared [`FakeServer`] or refuses to connect
pub struct FakeConnector(Option<FakeServer>);

impl FakeConnector {
    pub fn ok(server: FakeServer) -> Self {
        Self(Some(server))
    }

    pub fn refused() -> Self {
        Self(None)
    }
}

impl Connector for FakeConnector {
    type Server = FakeServer;

    fn connect(self) -> Result<FakeServer, PulseError> {
        self.0
            .ok_or_else(|| PulseError::ConnectionFailed("Connection refused".to_string()))
    }
}
