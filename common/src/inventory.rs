//! # Inventory
//!
//! The set of devices a hunt runs against, loaded from a JSON file.
//!
//! Two layouts are accepted:
//! * a bare list of devices,
//! * a document with `defaults` applied to every device that leaves a field unset:
//!
//! ```json
//! {
//!     "defaults": { "username": "netops", "platform": "cisco_xe" },
//!     "devices": [
//!         { "name": "R1", "hostname": "10.0.0.1" },
//!         { "name": "R2", "hostname": "10.0.0.2", "port": 2222 }
//!     ]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_PLATFORM: &str = "cisco_ios";

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("cannot read inventory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed inventory: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inventory contains no devices")]
    Empty,
    #[error("device '{0}' is listed more than once")]
    DuplicateDevice(String),
    #[error("invalid device entry: {0}")]
    InvalidDevice(String),
}

/// A device with its reachability parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Unique name, used for ordering and in every log line.
    pub name: String,
    /// Management address (IP or DNS name).
    pub hostname: String,
    pub port: u16,
    pub username: Option<String>,
    pub platform: String,
    /// Extra `-o` options handed to the SSH client.
    pub ssh_options: Vec<String>,
}

impl Device {
    pub fn new(name: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hostname: hostname.into(),
            port: DEFAULT_SSH_PORT,
            username: None,
            platform: DEFAULT_PLATFORM.to_string(),
            ssh_options: Vec::new(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceDefaults {
    port: Option<u16>,
    username: Option<String>,
    platform: Option<String>,
    ssh_options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceEntry {
    name: String,
    hostname: String,
    port: Option<u16>,
    username: Option<String>,
    platform: Option<String>,
    ssh_options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InventoryFile {
    List(Vec<DeviceEntry>),
    Document {
        #[serde(default)]
        defaults: DeviceDefaults,
        devices: Vec<DeviceEntry>,
    },
}

impl DeviceEntry {
    fn resolve(self, defaults: &DeviceDefaults) -> Result<Device, InventoryError> {
        let name = self.name.trim().to_string();
        let hostname = self.hostname.trim().to_string();
        if name.is_empty() {
            return Err(InventoryError::InvalidDevice("empty device name".to_string()));
        }
        if hostname.is_empty() {
            return Err(InventoryError::InvalidDevice(format!("'{name}' has no hostname")));
        }

        Ok(Device {
            name,
            hostname,
            port: self.port.or(defaults.port).unwrap_or(DEFAULT_SSH_PORT),
            username: self.username.or_else(|| defaults.username.clone()),
            platform: self
                .platform
                .or_else(|| defaults.platform.clone())
                .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            ssh_options: self
                .ssh_options
                .or_else(|| defaults.ssh_options.clone())
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Inventory {
    devices: Vec<Device>,
}

impl Inventory {
    /// Builds an inventory, rejecting empty sets and duplicate names.
    pub fn new(devices: Vec<Device>) -> Result<Self, InventoryError> {
        if devices.is_empty() {
            return Err(InventoryError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for device in &devices {
            if !seen.insert(device.name.as_str()) {
                return Err(InventoryError::DuplicateDevice(device.name.clone()));
            }
        }

        Ok(Self { devices })
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, InventoryError> {
        let (defaults, entries) = match serde_json::from_str::<InventoryFile>(content)? {
            InventoryFile::List(entries) => (DeviceDefaults::default(), entries),
            InventoryFile::Document { defaults, devices } => (defaults, devices),
        };

        let devices = entries
            .into_iter()
            .map(|entry| entry.resolve(&defaults))
            .collect::<Result<Vec<Device>, InventoryError>>()?;

        Self::new(devices)
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
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
