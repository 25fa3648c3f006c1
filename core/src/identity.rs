//! # Device Identity Fetcher

use std::time::Duration;

use machunt_common::inventory::Device;
use machunt_common::network::DeviceIdentity;
use machunt_common::session::{DeviceSession, SHOW_VERSION, SessionError};
use machunt_protocols::version;

use crate::session;

/// Serial, OS and uptime of `device`. Uptime is kept exactly as reported.
pub async fn identity_of(
    session: &dyn DeviceSession,
    device: &Device,
    timeout: Duration,
) -> Result<DeviceIdentity, SessionError> {
    let output = session::execute(session, device, SHOW_VERSION, timeout).await?;
    let info = version::extract_version(&output)?;

    Ok(DeviceIdentity {
        management_address: device.hostname.clone(),
        os_description: info.os_description(),
        serial_number: info.serial_number,
        uptime: info.uptime,
    })
}
