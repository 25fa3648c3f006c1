use colored::*;
use machunt_common::inventory::Device;
use machunt_common::report::{DeviceWarning, Report};
use machunt_common::session::SessionError;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn identity_to_details(report: &Report) -> Vec<Detail> {
    let identity = &report.identity;
    vec![
        (
            "Mgmt IP".to_string(),
            identity.management_address.color(colors::ACCENT),
        ),
        ("Serial".to_string(), identity.serial_number.normal()),
        ("OS".to_string(), identity.os_description.normal()),
        ("Uptime".to_string(), identity.uptime.normal()),
    ]
}

/// `Connected to SW-CORE's GigabitEthernet1/1`
pub fn neighbor_lines(report: &Report) -> Vec<String> {
    report
        .neighbors
        .iter()
        .map(|neighbor| {
            format!(
                "Connected to {}'s {}",
                neighbor.remote_device_id.color(colors::PRIMARY),
                neighbor.remote_port_id.color(colors::INTERFACE)
            )
        })
        .collect()
}

pub fn presence_line(report: &Report) -> String {
    let found = &report.found;
    format!(
        "MAC ADDRESS: {} is present on {}'s {}",
        found.target.to_string().color(colors::MAC_ADDR),
        found.device.name.color(colors::PRIMARY),
        found.interface_name.color(colors::INTERFACE)
    )
}

pub fn warning_line(warning: &DeviceWarning) -> String {
    let reason = match warning.error {
        SessionError::Connection(_) | SessionError::Timeout(_) => "unreachable",
        SessionError::Command(_) => "rejected",
        SessionError::Parse(_) => "unparseable",
    };

    let mut line = format!(
        "{} ({}) {}: {} failed, {}",
        warning.device.name.color(colors::PRIMARY),
        warning.device.hostname,
        reason.color(colors::WARNING),
        warning.stage,
        warning.error
    );

    if let Some(interface) = &warning.matched_interface {
        line.push_str(&format!(
            " (target was seen on {})",
            interface.color(colors::INTERFACE)
        ));
    }
    line
}

pub fn device_to_details(device: &Device) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("Mgmt IP".to_string(), device.hostname.color(colors::ACCENT)),
        ("Port".to_string(), device.port.to_string().normal()),
        ("Platform".to_string(), device.platform.normal()),
    ];

    if let Some(username) = &device.username {
        details.push(("User".to_string(), username.normal()));
    }
    details
}
