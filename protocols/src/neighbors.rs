//! `show cdp neighbors` / `show lldp neighbors` projection.
//!
//! Both tables share a layout: device id first, local interface next, the
//! hold time after it and the remote port id last. CDP wraps long device ids
//! onto a line of their own; the rest of the entry follows on the next line.

use machunt_common::network::NeighborRecord;
use machunt_common::session::{CommandOutput, SHOW_CDP_NEIGHBORS, SHOW_LLDP_NEIGHBORS};
use serde_json::Value;

use crate::ParseError;

/// Neighbor table flavours understood by [`extract_neighbors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborTable {
    Cdp,
    Lldp,
}

impl NeighborTable {
    pub fn command(&self) -> &'static str {
        match self {
            NeighborTable::Cdp => SHOW_CDP_NEIGHBORS,
            NeighborTable::Lldp => SHOW_LLDP_NEIGHBORS,
        }
    }

    fn structured_key(&self) -> &'static str {
        match self {
            NeighborTable::Cdp => "cdp",
            NeighborTable::Lldp => "lldp",
        }
    }
}

/// Extracts all neighbor entries in the order the device reported them.
///
/// Interface names are kept as the device spelled them (`Gig 0/1`); compare
/// them with [`crate::intf_name::same_interface`].
pub fn extract_neighbors(
    table: NeighborTable,
    output: &CommandOutput,
) -> Result<Vec<NeighborRecord>, ParseError> {
    match output {
        CommandOutput::Text(text) => from_text(table, text),
        CommandOutput::Structured(value) => from_structured(table, value),
    }
}

fn from_text(table: NeighborTable, text: &str) -> Result<Vec<NeighborRecord>, ParseError> {
    let command = table.command();
    let mut lines = text.lines();

    lines
        .by_ref()
        .find(|line| line.trim_start().starts_with("Device ID"))
        .ok_or_else(|| ParseError::Schema {
            command,
            detail: "neighbor table header not found".to_string(),
        })?;

    let mut records: Vec<NeighborRecord> = Vec::new();
    let mut wrapped_id: Option<&str> = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("Total") {
            break;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();

        if let Some(device_id) = wrapped_id.take() {
            records.push(entry_from_tokens(command, device_id, &tokens, line)?);
            continue;
        }

        match tokens.as_slice() {
            [device_id] => wrapped_id = Some(*device_id),
            [device_id, rest @ ..] => records.push(entry_from_tokens(command, device_id, rest, line)?),
            [] => {}
        }
    }

    if let Some(device_id) = wrapped_id {
        return Err(ParseError::MalformedLine {
            command,
            line: device_id.to_string(),
        });
    }

    Ok(records)
}

/// `tokens` holds everything after the device id:
/// `Gig 0/1  157  R S I  WS-C3750  Gig 1/0/1`.
fn entry_from_tokens(
    command: &'static str,
    device_id: &str,
    tokens: &[&str],
    line: &str,
) -> Result<NeighborRecord, ParseError> {
    let malformed = || ParseError::MalformedLine {
        command,
        line: line.trim().to_string(),
    };

    let local_len = interface_token_count(tokens).ok_or_else(malformed)?;
    let (local, rest) = tokens.split_at(local_len);

    let hold_time_ok = rest.first().is_some_and(|t| t.parse::<u32>().is_ok());
    if !hold_time_ok {
        return Err(malformed());
    }

    let after_hold = &rest[1..];
    let port_len = port_token_count(after_hold).ok_or_else(malformed)?;
    let port = &after_hold[after_hold.len() - port_len..];

    Ok(NeighborRecord::new(local.join(" "), device_id, port.join(" ")))
}

/// An interface is either one token (`Gi0/1`) or a word plus number (`Gig 0/1`).
fn interface_token_count(tokens: &[&str]) -> Option<usize> {
    match tokens {
        [word, number, ..] if is_split_name(word, number) => Some(2),
        [_, ..] => Some(1),
        [] => None,
    }
}

fn port_token_count(tokens: &[&str]) -> Option<usize> {
    match tokens {
        [.., word, number] if is_split_name(word, number) => Some(2),
        [_, ..] => Some(1),
        [] => None,
    }
}

fn is_split_name(word: &str, number: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        && number.starts_with(|c: char| c.is_ascii_digit())
}

#[derive(Debug, serde::Deserialize)]
struct IndexEntry {
    device_id: String,
    local_interface: String,
    port_id: String,
}

/// Genie shape: `{ "cdp": { "index": { "1": { "device_id": ..., ... } } } }`.
///
/// An empty mapping means no neighbors.
fn from_structured(table: NeighborTable, value: &Value) -> Result<Vec<NeighborRecord>, ParseError> {
    let command = table.command();
    let schema = |detail: String| ParseError::Schema { command, detail };

    let root = value
        .as_object()
        .ok_or_else(|| schema("expected a mapping".to_string()))?;
    if root.is_empty() {
        return Ok(Vec::new());
    }

    let key = table.structured_key();
    let section = root
        .get(key)
        .ok_or_else(|| schema(format!("missing '{key}' section")))?;
    let Some(index) = section.get("index") else {
        return Ok(Vec::new());
    };

    let index = index
        .as_object()
        .ok_or_else(|| schema("index is not a mapping".to_string()))?;

    let mut entries: Vec<(u64, IndexEntry)> = Vec::with_capacity(index.len());
    for (position, entry) in index {
        let position: u64 = position
            .parse()
            .map_err(|_| schema(format!("non-numeric index '{position}'")))?;
        let entry: IndexEntry = serde_json::from_value(entry.clone())
            .map_err(|e| schema(format!("index {position}: {e}")))?;
        entries.push((position, entry));
    }
    entries.sort_by_key(|(position, _)| *position);

    Ok(entries
        .into_iter()
        .map(|(_, entry)| NeighborRecord::new(entry.local_interface, entry.device_id, entry.port_id))
        .collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
