//! # Hunt Results
//!
//! A [`Report`] is assembled for every device that carries the target
//! address; devices that could not be queried end up as [`DeviceWarning`]s.
//! Both are collected into a [`FleetOutcome`] which the caller renders and drops.

use std::fmt;

use crate::inventory::Device;
use crate::network::{DeviceIdentity, HardwareAddress, NeighborRecord};
use crate::session::SessionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub device: Device,
    pub interface_name: String,
    pub target: HardwareAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub found: MatchResult,
    /// Only neighbors seen on `found.interface_name`, in device order.
    pub neighbors: Vec<NeighborRecord>,
    pub identity: DeviceIdentity,
}

/// Which step of the per-device pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    InterfaceScan,
    NeighborQuery,
    IdentityQuery,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::InterfaceScan => "interface scan",
            Stage::NeighborQuery => "neighbor query",
            Stage::IdentityQuery => "identity query",
        };
        f.write_str(text)
    }
}

/// A device that was skipped. Never fatal to the run.
#[derive(Debug, Clone)]
pub struct DeviceWarning {
    pub device: Device,
    pub stage: Stage,
    pub error: SessionError,
    /// Set when the target was found but enrichment failed afterwards.
    pub matched_interface: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FleetOutcome {
    /// Sorted by device name.
    pub reports: Vec<Report>,
    /// Sorted by device name.
    pub warnings: Vec<DeviceWarning>,
    /// Devices whose work ran to completion (match, no match, or failure).
    pub devices_scanned: usize,
    /// Set when first-match mode stopped the scan before every device finished.
    pub stopped_early: bool,
}

impl FleetOutcome {
    pub fn is_found(&self) -> bool {
        !self.reports.is_empty()
    }

    /// Restores a deterministic order after collecting in completion order.
    pub fn sort(&mut self) {
        self.reports.sort_by(|a, b| a.found.device.name.cmp(&b.found.device.name));
        self.warnings.sort_by(|a, b| a.device.name.cmp(&b.device.name));
    }
}
