mod tests_builder;
mod tests_graph;
mod tests_ids;

use crate::context::DiscoveryContext;
use crate::model::{RawBatch, RawConnectivity, RawDevice, RawPort};

pub(super) fn context_from(batch: RawBatch) -> DiscoveryContext {
    let mut context = DiscoveryContext::new();
    context.ingest(batch);
    context
}

pub(super) fn device(id: &str) -> RawDevice {
    RawDevice {
        id: Some(id.to_string()),
        ..RawDevice::default()
    }
}

pub(super) fn port(id: &str, device: &str, mac: Option<&str>, location: Option<&str>) -> RawPort {
    RawPort {
        id: Some(id.to_string()),
        device_id: Some(device.to_string()),
        mac_address: mac.map(str::to_string),
        physical_location: location.map(str::to_string),
        ..RawPort::default()
    }
}

pub(super) fn link(device: &str, port: &str, remote_device: &str, remote_port: &str) -> RawConnectivity {
    RawConnectivity {
        device_id: Some(device.to_string()),
        port_id: Some(port.to_string()),
        remote_device_id: Some(remote_device.to_string()),
        remote_port_id: Some(remote_port.to_string()),
        segment_id: None,
    }
}

pub(super) fn on_segment(device: &str, port: &str, segment: &str) -> RawConnectivity {
    RawConnectivity {
        device_id: Some(device.to_string()),
        port_id: Some(port.to_string()),
        segment_id: Some(segment.to_string()),
        ..RawConnectivity::default()
    }
}
