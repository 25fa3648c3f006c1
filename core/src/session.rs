//! Concrete [`DeviceSession`]s and the timeout guard every command runs under.

use std::time::Duration;

use machunt_common::inventory::Device;
use machunt_common::session::{CommandOutput, DeviceSession, SessionError};
use tracing::debug;

mod capture;
mod ssh;

pub use capture::CaptureSession;
pub use ssh::SshSession;

/// Runs one command, converting an overrun into [`SessionError::Timeout`].
///
/// The in-flight future is dropped on timeout; sessions must clean up on drop.
pub async fn execute(
    session: &dyn DeviceSession,
    device: &Device,
    command: &str,
    timeout: Duration,
) -> Result<CommandOutput, SessionError> {
    debug!("{}: sending '{command}'", device.name);
    match tokio::time::timeout(timeout, session.execute(device, command)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(SessionError::Timeout(timeout)),
    }
}
