//! # Hardware Address
//!
//! A 48-bit link-layer address, parsed once and compared by value.
//!
//! Accepted textual encodings (case-insensitive, surrounding whitespace ignored):
//! * **Colon / hyphen octets**: `aa:bb:cc:dd:ee:ff`, `AA-BB-CC-DD-EE-FF`, `a:b:c:d:e:f`.
//! * **Dotted quads** (Cisco): `aabb.ccdd.eeff`, also with `:` or `-` between the quads.
//! * **Halves**: `aabbcc-ddeeff`, `aabbcc:ddeeff`.
//! * **Bare hex**: `aabbccddeeff`.

use std::fmt;
use std::str::FromStr;

use pnet::util::MacAddr;
use thiserror::Error;

const HEX_DIGITS: usize = 12;
const DELIMITERS: [char; 3] = [':', '-', '.'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid hardware address format: '{0}'")]
    InvalidFormat(String),
}

/// Canonical 48-bit hardware address.
///
/// Two values are equal when their bits are equal, regardless of how the
/// input text was delimited or cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareAddress(MacAddr);

impl HardwareAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        let [a, b, c, d, e, f] = octets;
        Self(MacAddr::new(a, b, c, d, e, f))
    }

    pub fn parse(input: &str) -> Result<Self, AddressError> {
        input.parse()
    }

    pub fn octets(&self) -> [u8; 6] {
        let MacAddr(a, b, c, d, e, f) = self.0;
        [a, b, c, d, e, f]
    }

    pub fn mac(&self) -> MacAddr {
        self.0
    }

    /// Dotted-quad form used by IOS, e.g. `aabb.ccdd.eeff`.
    pub fn to_cisco(&self) -> String {
        let o = self.octets();
        format!(
            "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl From<MacAddr> for HardwareAddress {
    fn from(mac: MacAddr) -> Self {
        Self(mac)
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02X}-{:02X}-{:02X}-{:02X}-{:02X}-{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for HardwareAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || AddressError::InvalidFormat(s.to_string());

        let hex: String = match find_delimiter(trimmed).map_err(|_| invalid())? {
            None => trimmed.to_string(),
            Some(delim) => {
                let groups: Vec<&str> = trimmed.split(delim).collect();
                join_groups(&groups, delim).ok_or_else(invalid)?
            }
        };

        let octets = hex_to_octets(&hex).ok_or_else(invalid)?;
        Ok(Self::new(octets))
    }
}

/// Returns the single delimiter used by `s`, if any.
///
/// Mixing delimiters (`aa:bb-cc...`) is rejected.
fn find_delimiter(s: &str) -> Result<Option<char>, ()> {
    let mut found = DELIMITERS.iter().copied().filter(|d| s.contains(*d));
    let first = found.next();
    match found.next() {
        Some(_) => Err(()),
        None => Ok(first),
    }
}

/// Validates the group layout and flattens it into 12 hex digits.
fn join_groups(groups: &[&str], delim: char) -> Option<String> {
    let valid_layout = match groups.len() {
        6 if delim != '.' => groups.iter().all(|g| (1..=2).contains(&g.len())),
        3 => groups.iter().all(|g| g.len() == 4),
        2 if delim != '.' => groups.iter().all(|g| g.len() == 6),
        _ => false,
    };

    if !valid_layout {
        return None;
    }

    Some(groups.iter().map(|g| format!("{g:0>2}")).collect())
}

fn hex_to_octets(hex: &str) -> Option<[u8; 6]> {
    if hex.len() != HEX_DIGITS || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut octets = [0u8; 6];
    for (idx, octet) in octets.iter_mut().enumerate() {
        *octet = u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).ok()?;
    }
    Some(octets)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
