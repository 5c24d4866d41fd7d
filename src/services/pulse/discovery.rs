use libpulse_binding::{
    callbacks::ListResult,
    context::{Context, introspect::SinkInfo},
};

use crate::device::{DeviceIndex, DeviceObservation, RawDeviceState};
use crate::watcher::ServerEvent;

use super::types::{EventSender, RawEvent};

/// Query the named sink; the reply is forwarded on `events_tx`
pub fn query_sink(context: &Context, name: &str, events_tx: &EventSender) {
    let reply_tx = events_tx.clone();
    context
        .introspect()
        .get_sink_info_by_name(name, move |result| {
            let event = match result {
                ListResult::Item(sink_info) => {
                    ServerEvent::DeviceInfo(observation_from_sink(sink_info))
                }
                ListResult::End => return,
                ListResult::Error => ServerEvent::DeviceMissing,
            };
            let _ = reply_tx.send(RawEvent::Server(event));
        });
}

/// Build an observation from a sink info record
pub fn observation_from_sink(sink_info: &SinkInfo) -> DeviceObservation {
    DeviceObservation {
        index: DeviceIndex(sink_info.index),
        name: sink_info
            .name
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_default(),
        raw: RawDeviceState::from(sink_info.state),
    }
}
