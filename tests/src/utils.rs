use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use machunt_common::inventory::Device;
use machunt_common::session::{
    CommandOutput, DeviceSession, SessionError, SHOW_CDP_NEIGHBORS, SHOW_INTERFACES, SHOW_LLDP_NEIGHBORS,
    SHOW_VERSION,
};
use serde_json::{json, Value};

/// Canned answers for one device.
#[derive(Default, Clone)]
pub struct ScriptedDevice {
    outputs: HashMap<String, Result<CommandOutput, SessionError>>,
    latency: Duration,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose interface table holds `(name, mac)` pairs.
    pub fn with_interfaces(interfaces: &[(&str, &str)]) -> Self {
        let table: serde_json::Map<String, Value> = interfaces
            .iter()
            .map(|(name, mac)| (name.to_string(), json!({ "mac_address": mac })))
            .collect();
        Self::new().answer(SHOW_INTERFACES, CommandOutput::Structured(Value::Object(table)))
    }

    /// Adds a CDP table of `(local_interface, device_id, port_id)` rows.
    pub fn cdp(self, rows: &[(&str, &str, &str)]) -> Self {
        self.answer(SHOW_CDP_NEIGHBORS, neighbor_table("cdp", rows))
    }

    /// Same row layout as [`ScriptedDevice::cdp`], answered to the LLDP command.
    pub fn lldp(self, rows: &[(&str, &str, &str)]) -> Self {
        self.answer(SHOW_LLDP_NEIGHBORS, neighbor_table("lldp", rows))
    }

    pub fn version(self, serial: &str) -> Self {
        let value = json!({
            "version": {
                "os": "IOS-XE",
                "version": "17.3.4",
                "chassis_sn": serial,
                "uptime": "1 week, 2 days"
            }
        });
        self.answer(SHOW_VERSION, CommandOutput::Structured(value))
    }

    pub fn answer(mut self, command: &str, output: CommandOutput) -> Self {
        self.outputs.insert(command.to_string(), Ok(output));
        self
    }

    pub fn fail(mut self, command: &str, error: SessionError) -> Self {
        self.outputs.insert(command.to_string(), Err(error));
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// In-memory [`DeviceSession`] answering from [`ScriptedDevice`]s.
///
/// Unknown devices refuse the connection; unknown commands are rejected.
#[derive(Default)]
pub struct MockSession {
    devices: HashMap<String, ScriptedDevice>,
    calls: Mutex<Vec<(String, String)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, name: &str, device: ScriptedDevice) -> Self {
        self.devices.insert(name.to_string(), device);
        self
    }

    /// Commands sent to `device`, in order.
    pub fn commands_for(&self, device: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == device)
            .map(|(_, command)| command.clone())
            .collect()
    }

    /// Highest number of commands that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeviceSession for MockSession {
    async fn execute(&self, device: &Device, command: &str) -> Result<CommandOutput, SessionError> {
        self.calls
            .lock()
            .unwrap()
            .push((device.name.clone(), command.to_string()));

        let Some(scripted) = self.devices.get(&device.name) else {
            return Err(SessionError::Connection(format!("{}: connection refused", device.hostname)));
        };

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if !scripted.latency.is_zero() {
            tokio::time::sleep(scripted.latency).await;
        }

        scripted
            .outputs
            .get(command)
            .cloned()
            .unwrap_or_else(|| Err(SessionError::Command(format!("% Invalid input: {command}"))))
    }
}

/// Decrements the in-flight counter even when the command future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Genie-shaped `{ "<section>": { "index": { "1": {...} } } }` neighbor table.
fn neighbor_table(section: &str, rows: &[(&str, &str, &str)]) -> CommandOutput {
    let index: serde_json::Map<String, Value> = rows
        .iter()
        .enumerate()
        .map(|(idx, (local, id, port))| {
            (
                (idx + 1).to_string(),
                json!({ "device_id": id, "local_interface": local, "port_id": port }),
            )
        })
        .collect();
    let mut table = serde_json::Map::new();
    table.insert(section.to_string(), json!({ "index": index }));
    CommandOutput::Structured(Value::Object(table))
}

pub fn fleet(names: &[&str]) -> Vec<Device> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| Device::new(*name, format!("10.0.0.{}", idx + 1)))
        .collect()
}
