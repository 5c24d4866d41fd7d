use libpulse_binding::context::{
    Context,
    subscribe::{Facility, InterestMaskSet, Operation},
};
use tracing::trace;

use crate::device::DeviceIndex;
use crate::watcher::ServerEvent;

use super::types::{EventSender, RawEvent};

type SubscriptionCallback = Option<Box<dyn FnMut(Option<Facility>, Option<Operation>, u32)>>;

/// Forward sink change notifications and subscribe to them.
///
/// Notifications for other facilities are dropped here, so the watcher only
/// ever sees device events.
pub fn subscribe_sink_events(context: &mut Context, events_tx: &EventSender) {
    let change_tx = events_tx.clone();
    let subscription_callback: SubscriptionCallback =
        Some(Box::new(move |facility, operation, index| {
            match sink_event(facility, index) {
                Some(event) => {
                    let _ = change_tx.send(RawEvent::Server(event));
                }
                None => trace!(?facility, ?operation, index, "Ignoring non-sink event"),
            }
        }));
    context.set_subscribe_callback(subscription_callback);

    let reply_tx = events_tx.clone();
    context.subscribe(InterestMaskSet::SINK, move |success: bool| {
        let _ = reply_tx.send(RawEvent::Server(ServerEvent::Subscribed { success }));
    });
}

fn sink_event(facility: Option<Facility>, index: u32) -> Option<ServerEvent> {
    match facility {
        Some(Facility::Sink) => Some(ServerEvent::DeviceChanged {
            index: DeviceIndex(index),
        }),
        _ => None,
    }
}

/// Report every context state change on `events_tx`
pub fn watch_context_state(context: &mut Context, events_tx: &EventSender) {
    let state_tx = events_tx.clone();
    context.set_state_callback(Some(Box::new(move || {
        let _ = state_tx.send(RawEvent::StateChanged);
    })));
}
