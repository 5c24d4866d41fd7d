use std::fmt;

use libpulse_binding::{context, def::SinkState};

/// Audio device index assigned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIndex(pub u32);

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Suspend state tracked for the watched device.
///
/// `Unknown` is the value before the first observation and is never
/// written to hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    /// No observation received yet
    #[default]
    Unknown,
    /// Device is suspended, the output line is driven inactive
    Suspended,
    /// Device is not suspended, the output line is driven active
    Active,
}

/// Device state exactly as the audio server reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDeviceState {
    /// Server reported an invalid state
    Invalid,
    /// Device is playing
    Running,
    /// Device is open but idle
    Idle,
    /// Device is suspended
    Suspended,
    /// State value not recognised
    Unknown,
}

impl fmt::Display for RawDeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RawDeviceState::Invalid => "Invalid",
            RawDeviceState::Running => "Running",
            RawDeviceState::Idle => "Idle",
            RawDeviceState::Suspended => "Suspended",
            RawDeviceState::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl From<SinkState> for RawDeviceState {
    fn from(state: SinkState) -> Self {
        match state {
            SinkState::Invalid => RawDeviceState::Invalid,
            SinkState::Running => RawDeviceState::Running,
            SinkState::Idle => RawDeviceState::Idle,
            SinkState::Suspended => RawDeviceState::Suspended,
            #[allow(unreachable_patterns)]
            _ => RawDeviceState::Unknown,
        }
    }
}

impl From<RawDeviceState> for DeviceState {
    fn from(raw: RawDeviceState) -> Self {
        match raw {
            RawDeviceState::Suspended => DeviceState::Suspended,
            _ => DeviceState::Active,
        }
    }
}

/// The watched device: a fixed name plus the lazily resolved index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    name: String,
    index: Option<DeviceIndex>,
}

impl DeviceIdentity {
    /// Create an identity for the named device with no index resolved yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Device name as given at startup
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached index, if a query has resolved it
    pub fn index(&self) -> Option<DeviceIndex> {
        self.index
    }

    /// Cache `index` if nothing is cached yet.
    ///
    /// Returns `false` when a different index was already cached; the cached
    /// value is kept in that case.
    pub fn resolve(&mut self, index: DeviceIndex) -> bool {
        *self.index.get_or_insert(index) == index
    }

    /// Whether an event for `index` concerns this device
    pub fn matches(&self, index: DeviceIndex) -> bool {
        self.index == Some(index)
    }
}

/// One device query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceObservation {
    /// Index reported by the server
    pub index: DeviceIndex,
    /// Name reported by the server
    pub name: String,
    /// Reported state
    pub raw: RawDeviceState,
}

impl DeviceObservation {
    /// Suspend state this observation maps to
    pub fn state(&self) -> DeviceState {
        self.raw.into()
    }
}

/// Lifecycle of the audio server connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connecting, authorizing or registering the client name
    Connecting,
    /// Connection usable
    Ready,
    /// Connection closed cleanly
    Terminated,
    /// Connection failed
    Failed,
}

impl From<context::State> for ConnectionState {
    fn from(state: context::State) -> Self {
        match state {
            context::State::Unconnected
            | context::State::Connecting
            | context::State::Authorizing
            | context::State::SettingName => ConnectionState::Connecting,
            context::State::Ready => ConnectionState::Ready,
            context::State::Terminated => ConnectionState::Terminated,
            context::State::Failed => ConnectionState::Failed,
        }
    }
}
