use tokio::sync::mpsc;

use crate::watcher::ServerEvent;

/// Channel sender used by libpulse callbacks
pub type EventSender = mpsc::UnboundedSender<RawEvent>;

pub(super) type EventReceiver = mpsc::UnboundedReceiver<RawEvent>;

/// What a libpulse callback observed
#[derive(Debug, Clone)]
pub enum RawEvent {
    /// Context state callback fired; the state is read when the event is handled
    StateChanged,
    /// Event ready for the watcher
    Server(ServerEvent),
}
