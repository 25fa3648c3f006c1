//! `show version` projection.

use machunt_common::session::{CommandOutput, SHOW_VERSION};
use serde::Deserialize;
use serde_json::Value;

use crate::ParseError;

const UPTIME_MARKER: &str = " uptime is ";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    pub os: String,
    pub version: String,
    #[serde(rename = "chassis_sn")]
    pub serial_number: String,
    pub uptime: String,
}

impl VersionInfo {
    /// `IOS 15.2(4)E10`
    pub fn os_description(&self) -> String {
        format!("{} {}", self.os, self.version)
    }
}

pub fn extract_version(output: &CommandOutput) -> Result<VersionInfo, ParseError> {
    match output {
        CommandOutput::Text(text) => from_text(text),
        CommandOutput::Structured(value) => from_structured(value),
    }
}

fn from_text(text: &str) -> Result<VersionInfo, ParseError> {
    let missing = |field: &'static str| ParseError::MissingField {
        command: SHOW_VERSION,
        field,
    };

    Ok(VersionInfo {
        os: os_name(text).ok_or_else(|| missing("os"))?.to_string(),
        version: os_version(text).ok_or_else(|| missing("version"))?,
        serial_number: serial_number(text).ok_or_else(|| missing("chassis_sn"))?,
        uptime: uptime(text).ok_or_else(|| missing("uptime"))?,
    })
}

fn os_name(text: &str) -> Option<&'static str> {
    if text.contains("IOS XE") || text.contains("IOS-XE") {
        Some("IOS-XE")
    } else if text.contains("NX-OS") || text.contains("Nexus Operating System") {
        Some("NX-OS")
    } else if text.contains("Cisco IOS Software") || text.contains("IOS (tm)") {
        Some("IOS")
    } else {
        None
    }
}

/// Prefers the `Cisco IOS Software ..., Version X, RELEASE` banner, which
/// carries the dotted form on IOS-XE as well, then NX-OS `version` lines.
fn os_version(text: &str) -> Option<String> {
    let banner = text
        .lines()
        .filter(|line| line.contains("IOS Software") || line.contains("IOS (tm)"))
        .find_map(|line| token_after(line, "Version "));

    banner.or_else(|| {
        text.lines()
            .map(str::trim)
            .filter(|line| line.starts_with("NXOS:") || line.starts_with("system:"))
            .find_map(|line| token_after(line, "version "))
    })
}

fn serial_number(text: &str) -> Option<String> {
    for line in text.lines().map(str::trim) {
        if line.starts_with("System serial number")
            && let Some((_, value)) = line.split_once(':')
            && !value.trim().is_empty()
        {
            return Some(value.trim().to_string());
        }
    }

    text.lines()
        .map(str::trim)
        .find(|line| line.to_ascii_lowercase().starts_with("processor board id"))
        .and_then(|line| line.split_whitespace().nth(3))
        .map(str::to_string)
}

fn uptime(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.split_once(UPTIME_MARKER))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn token_after(line: &str, marker: &str) -> Option<String> {
    let (_, rest) = line.split_once(marker)?;
    rest.split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[derive(Deserialize)]
struct VersionDocument {
    version: VersionInfo,
}

/// Genie shape: `{ "version": { "os": ..., "version": ..., "chassis_sn": ..., "uptime": ... } }`.
fn from_structured(value: &Value) -> Result<VersionInfo, ParseError> {
    VersionDocument::deserialize(value)
        .map(|document| document.version)
        .map_err(|e| ParseError::Schema {
            command: SHOW_VERSION,
            detail: e.to_string(),
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
