//! Per-device value objects produced by a single query.
//!
//! None of these are cached: every scan builds them fresh from the
//! command output it just received.

use super::address::HardwareAddress;

/// One addressable interface reported by a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub interface_name: String,
    pub hardware_address: HardwareAddress,
}

impl InterfaceRecord {
    pub fn new(interface_name: impl Into<String>, hardware_address: HardwareAddress) -> Self {
        Self {
            interface_name: interface_name.into(),
            hardware_address,
        }
    }
}

/// A device seen through CDP or LLDP on one of our local interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRecord {
    pub local_interface: String,
    pub remote_device_id: String,
    pub remote_port_id: String,
}

impl NeighborRecord {
    pub fn new(
        local_interface: impl Into<String>,
        remote_device_id: impl Into<String>,
        remote_port_id: impl Into<String>,
    ) -> Self {
        Self {
            local_interface: local_interface.into(),
            remote_device_id: remote_device_id.into(),
            remote_port_id: remote_port_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub management_address: String,
    pub serial_number: String,
    /// OS name and version joined by a space, e.g. `IOS-XE 16.9.3`.
    pub os_description: String,
    /// Verbatim from the device, never recomputed.
    pub uptime: String,
}
