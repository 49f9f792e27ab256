//! Deterministic identifiers for CIs

use sha2::{Digest, Sha256};

use crate::model::{PortRef, VlanTag};

/// SHA-256 of `input`, hex encoded
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[must_use]
pub fn device_id(device: &str) -> String {
    format!("device:{device}")
}

#[must_use]
pub fn interface_id(port: &PortRef) -> String {
    format!("interface:{}:{}", port.device, port.port)
}

#[must_use]
pub fn physical_port_id(port: &PortRef) -> String {
    format!("port:{}:{}", port.device, port.port)
}

#[must_use]
pub fn vlan_id(device: &str, tag: VlanTag) -> String {
    format!("vlan:{device}:{tag}")
}

#[must_use]
pub fn module_id(device: &str, slot: &str) -> String {
    format!("module:{device}:{slot}")
}

#[must_use]
pub fn config_id(device: &str) -> String {
    format!("config:{device}")
}

/// Identifier of a layer-2 connection between endpoints
///
/// The endpoint keys are sorted before hashing, so the result does not
/// depend on which side of the link was processed first.
#[must_use]
pub fn layer2_connection_id<S: AsRef<str>>(endpoint_keys: &[S]) -> String {
    let mut keys: Vec<&str> = endpoint_keys.iter().map(AsRef::as_ref).collect();
    keys.sort_unstable();
    sha256_hex(&keys.concat())
}

/// Identifier of the synthetic node standing for a shared segment
#[must_use]
pub fn concentrator_id<S: AsRef<str>>(endpoint_keys: &[S]) -> String {
    format!("concentrator:{}", layer2_connection_id(endpoint_keys))
}
