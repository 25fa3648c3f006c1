//! # Interface Scanner
//!
//! Lists a device's interfaces and checks them against the target address.

use std::time::Duration;

use machunt_common::inventory::Device;
use machunt_common::network::{HardwareAddress, InterfaceRecord};
use machunt_common::session::{DeviceSession, SHOW_INTERFACES, SessionError};
use machunt_protocols::interfaces;
use tracing::debug;

use crate::session;

/// Fetches every addressable interface of `device`, in the order it reports them.
pub async fn scan(
    session: &dyn DeviceSession,
    device: &Device,
    timeout: Duration,
) -> Result<Vec<InterfaceRecord>, SessionError> {
    let output = session::execute(session, device, SHOW_INTERFACES, timeout).await?;
    let records = interfaces::extract_interfaces(&output)?;
    debug!("{}: {} addressable interfaces", device.name, records.len());
    Ok(records)
}

/// First interface carrying `target`. `None` is an ordinary outcome.
pub fn find_match<'a>(records: &'a [InterfaceRecord], target: &HardwareAddress) -> Option<&'a str> {
    records
        .iter()
        .find(|record| record.hardware_address == *target)
        .map(|record| record.interface_name.as_str())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
