//! # Neighbor Correlator
//!
//! Reads the CDP or LLDP table of a device and keeps the entries learned on
//! one local interface.

use std::time::Duration;

use machunt_common::config::NeighborProtocol;
use machunt_common::inventory::Device;
use machunt_common::network::NeighborRecord;
use machunt_common::session::{DeviceSession, SessionError};
use machunt_protocols::intf_name;
use machunt_protocols::neighbors::{self, NeighborTable};

use crate::session;

/// Neighbors seen on `interface_name`, in the order the device listed them.
///
/// An interface without neighbors (an end host link, say) yields an empty list.
pub async fn neighbors_for(
    session: &dyn DeviceSession,
    device: &Device,
    interface_name: &str,
    protocol: NeighborProtocol,
    timeout: Duration,
) -> Result<Vec<NeighborRecord>, SessionError> {
    let table = table_for(protocol);
    let output = session::execute(session, device, table.command(), timeout).await?;
    let all = neighbors::extract_neighbors(table, &output)?;
    Ok(on_interface(all, interface_name))
}

pub fn on_interface(records: Vec<NeighborRecord>, interface_name: &str) -> Vec<NeighborRecord> {
    records
        .into_iter()
        .filter(|record| intf_name::same_interface(&record.local_interface, interface_name))
        .collect()
}

fn table_for(protocol: NeighborProtocol) -> NeighborTable {
    match protocol {
        NeighborProtocol::Cdp => NeighborTable::Cdp,
        NeighborProtocol::Lldp => NeighborTable::Lldp,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use machunt_common::session::CommandOutput;

    struct FixedOutput(&'static str);

    #[async_trait]
    impl DeviceSession for FixedOutput {
        async fn execute(&self, _device: &Device, _command: &str) -> Result<CommandOutput, SessionError> {
            Ok(CommandOutput::Text(self.0.to_string()))
        }
    }

    const CDP: &str = "\
Device ID        Local Intrfce     Holdtme    Capability  Platform  Port ID
SW-CORE          Gig 0/1           157             R S I  WS-C3750  Gig 1/1
SW-EDGE          Gig 0/2           143             S I    WS-C2960  Gig 0/24
PHONE-7          Gig 0/1           150             H P    IP Phone  Port 1
";

    #[tokio::test]
    async fn keeps_only_the_matched_interface_in_order() {
        let device = Device::new("R1", "10.0.0.1");
        let records = neighbors_for(
            &FixedOutput(CDP),
            &device,
            "GigabitEthernet0/1",
            NeighborProtocol::Cdp,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

        assert_eq!(
            records,
            vec![
                NeighborRecord::new("Gig 0/1", "SW-CORE", "Gig 1/1"),
                NeighborRecord::new("Gig 0/1", "PHONE-7", "Port 1"),
            ]
        );
    }

    #[tokio::test]
    async fn interface_without_neighbors_is_empty() {
        let device = Device::new("R1", "10.0.0.1");
        let records = neighbors_for(
            &FixedOutput(CDP),
            &device,
            "GigabitEthernet0/9",
            NeighborProtocol::Cdp,
            Duration::from_secs(1),
        )
        .await
        .unwrap();

        assert!(records.is_empty());
    }
}
