//! # machunt core
//!
//! Finds which device of a fleet carries a hardware address and enriches
//! the hit with topology and identity data.
//!
//! The per-device pipeline is strictly sequential:
//! [`scanner`] lists interfaces and looks for the target, then
//! [`neighbors`] and [`identity`] run against the matching device only.
//! [`locator::Locator`] fans that pipeline out across the fleet.

pub mod identity;
pub mod locator;
pub mod neighbors;
pub mod scanner;
pub mod session;
pub mod vendors;

pub use locator::Locator;
