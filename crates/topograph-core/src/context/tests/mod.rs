
use crate::model::{RawDevice, RawPort};

pub(super) fn raw_device(id: &str) -> RawDevice {
    RawDevice {
        id: Some(id.to_string()),
        ..RawDevice::default()
    }
}

pub(super) fn raw_port(id: &str, device: &str) -> RawPort {
    RawPort {
        id: Some(id.to_string()),
        device_id: Some(device.to_string()),
        ..RawPort::default()
    }
}
