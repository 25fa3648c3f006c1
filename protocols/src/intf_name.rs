//! Interface name canonicalisation.
//!
//! Neighbor tables abbreviate interface names (`Gig 0/1`, `Gi0/1`) while the
//! interface listing spells them out (`GigabitEthernet0/1`). Names are mapped
//! to the long form before they are compared.

const INTERFACE_PREFIXES: &[(&[&str], &str)] = &[
    (&["gi", "gig", "gigabitethernet"], "GigabitEthernet"),
    (&["fa", "fas", "fastethernet"], "FastEthernet"),
    (&["te", "ten", "tengige", "tengigabitethernet"], "TenGigabitEthernet"),
    (&["tw", "two", "twogigabitethernet"], "TwoGigabitEthernet"),
    (&["fi", "fiv", "fivegigabitethernet"], "FiveGigabitEthernet"),
    (&["twe", "twentyfivegige", "twentyfivegigabitethernet"], "TwentyFiveGigE"),
    (&["fo", "for", "fortygige", "fortygigabitethernet"], "FortyGigabitEthernet"),
    (&["hu", "hun", "hundredgige", "hundredgigabitethernet"], "HundredGigE"),
    (&["et", "eth", "ethernet"], "Ethernet"),
    (&["po", "port-channel", "portchannel"], "Port-channel"),
    (&["vl", "vlan"], "Vlan"),
    (&["lo", "loopback"], "Loopback"),
    (&["tu", "tunnel"], "Tunnel"),
    (&["se", "ser", "serial"], "Serial"),
];

/// Expands a known abbreviation, e.g. `Gig 1/0/1` to `GigabitEthernet1/0/1`.
///
/// Names with an unknown prefix (`ens3`, `Port 1`) are returned trimmed but
/// otherwise untouched.
pub fn canonical(name: &str) -> String {
    let trimmed = name.trim();
    let Some(split_at) = trimmed.find(|c: char| c.is_ascii_digit()) else {
        return trimmed.to_string();
    };

    let (prefix, number) = trimmed.split_at(split_at);
    let prefix_key = prefix.trim().to_ascii_lowercase();

    match lookup_prefix(&prefix_key) {
        Some(full) => format!("{full}{}", number.trim()),
        None => trimmed.to_string(),
    }
}

/// True when both names refer to the same interface.
pub fn same_interface(a: &str, b: &str) -> bool {
    canonical(a).eq_ignore_ascii_case(&canonical(b))
}

fn lookup_prefix(prefix: &str) -> Option<&'static str> {
    INTERFACE_PREFIXES
        .iter()
        .find(|(aliases, _)| aliases.contains(&prefix))
        .map(|(_, full)| *full)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
