//! `show interfaces` projection.

use machunt_common::network::{HardwareAddress, InterfaceRecord};
use machunt_common::session::{CommandOutput, SHOW_INTERFACES};
use serde_json::Value;
use tracing::debug;

use crate::ParseError;

const HEADER_MARKER: &str = ", line protocol is ";
const HARDWARE_MARKER: &str = "Hardware is ";
const ADDRESS_MARKER: &str = "address is ";

/// Extracts every interface that carries a hardware address, in device order.
///
/// Interfaces without an address (tunnels, loopbacks, ...) are skipped.
pub fn extract_interfaces(output: &CommandOutput) -> Result<Vec<InterfaceRecord>, ParseError> {
    match output {
        CommandOutput::Text(text) => from_text(text),
        CommandOutput::Structured(value) => from_structured(value),
    }
}

fn from_text(text: &str) -> Result<Vec<InterfaceRecord>, ParseError> {
    let mut records: Vec<InterfaceRecord> = Vec::new();
    let mut current: Option<&str> = None;
    let mut headers_seen: usize = 0;

    for line in text.lines() {
        if let Some(name) = header_name(line) {
            current = Some(name);
            headers_seen += 1;
            continue;
        }

        let Some(interface) = current else {
            continue;
        };

        if let Some(raw_addr) = hardware_address_token(line) {
            let hardware_address = parse_address(interface, raw_addr)?;
            records.push(InterfaceRecord::new(interface, hardware_address));
            // One address per interface; ignore anything else in its body.
            current = None;
        }
    }

    if headers_seen == 0 {
        return Err(ParseError::Schema {
            command: SHOW_INTERFACES,
            detail: "no interface headers found".to_string(),
        });
    }

    debug!("{SHOW_INTERFACES}: {} of {headers_seen} interfaces carry an address", records.len());
    Ok(records)
}

/// `GigabitEthernet0/1 is up, line protocol is up (connected)` yields the name.
fn header_name(line: &str) -> Option<&str> {
    if line.starts_with(char::is_whitespace) || !line.contains(HEADER_MARKER) {
        return None;
    }
    let (name, _) = line.split_once(" is ")?;
    let name = name.trim();
    (!name.is_empty() && !name.contains(' ')).then_some(name)
}

/// `  Hardware is iGbE, address is 5254.0012.3456 (bia 5254.0012.3456)`
fn hardware_address_token(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with(HARDWARE_MARKER) {
        return None;
    }
    let (_, rest) = trimmed.split_once(ADDRESS_MARKER)?;
    rest.split_whitespace().next()
}

fn from_structured(value: &Value) -> Result<Vec<InterfaceRecord>, ParseError> {
    let interfaces = value.as_object().ok_or_else(|| ParseError::Schema {
        command: SHOW_INTERFACES,
        detail: "expected a mapping of interface names".to_string(),
    })?;

    let mut records: Vec<InterfaceRecord> = Vec::new();
    for (name, attributes) in interfaces {
        let attributes = attributes.as_object().ok_or_else(|| ParseError::Schema {
            command: SHOW_INTERFACES,
            detail: format!("attributes of {name} are not a mapping"),
        })?;

        let Some(raw_addr) = attributes.get("mac_address") else {
            continue;
        };
        let raw_addr = raw_addr.as_str().ok_or_else(|| ParseError::Schema {
            command: SHOW_INTERFACES,
            detail: format!("mac_address of {name} is not a string"),
        })?;

        records.push(InterfaceRecord::new(name.as_str(), parse_address(name, raw_addr)?));
    }

    Ok(records)
}

fn parse_address(interface: &str, raw: &str) -> Result<HardwareAddress, ParseError> {
    HardwareAddress::parse(raw).map_err(|source| ParseError::InvalidAddress {
        command: SHOW_INTERFACES,
        interface: interface.to_string(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
