//! # machunt common
//!
//! Domain values shared by every crate of the workspace.
//!
//! * [`network`]: hardware addresses and the per-device records a scan produces.
//! * [`report`]: match results, enriched reports and the fleet outcome.
//! * [`inventory`]: the devices a hunt runs against.
//! * [`session`]: the port through which commands reach a device.
//! * [`vendors`]: the port for OUI vendor lookups.

pub mod config;
pub mod inventory;
pub mod network;
pub mod report;
pub mod session;
pub mod vendors;
