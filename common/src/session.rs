//! # Device Session Port
//!
//! The only way the hunt reaches a device. Implementations open whatever
//! transport they need, run one command and hand back its output; they are
//! injected into the locator rather than registered globally.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::inventory::Device;

pub const SHOW_INTERFACES: &str = "show interfaces";
pub const SHOW_CDP_NEIGHBORS: &str = "show cdp neighbors";
pub const SHOW_LLDP_NEIGHBORS: &str = "show lldp neighbors";
pub const SHOW_VERSION: &str = "show version";

/// Raw CLI text, or a loosely structured tree for devices (and captures)
/// that can emit one. Either form is projected into typed records before use.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Text(String),
    Structured(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Transport or authentication failure. Not retried within a run.
    #[error("connection failed: {0}")]
    Connection(String),
    /// The device answered but rejected or failed the command.
    #[error("command failed: {0}")]
    Command(String),
    /// Output arrived but did not have the expected shape.
    #[error("unexpected output: {0}")]
    Parse(String),
    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl SessionError {
    /// Timeouts count as unreachable, exactly like connection failures.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, SessionError::Connection(_) | SessionError::Timeout(_))
    }
}

#[async_trait]
pub trait DeviceSession: Send + Sync {
    async fn execute(&self, device: &Device, command: &str) -> Result<CommandOutput, SessionError>;
}
