//! A session backed by the system OpenSSH client.
//!
//! Every command is a separate non-interactive exec request, so no prompt
//! handling or paging is involved. Authentication is whatever the local
//! client is configured for (agent, keys, `~/.ssh/config`); password prompts
//! are disabled through `BatchMode`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use machunt_common::inventory::Device;
use machunt_common::session::{CommandOutput, DeviceSession, SessionError};
use tokio::process::Command;

const SSH_BINARY: &str = "ssh";
const SSH_CONNECTION_FAILURE: i32 = 255;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Markers IOS prints instead of output when it rejects a command.
const COMMAND_ERROR_MARKERS: &[&str] = &[
    "% Invalid input",
    "% Unknown command",
    "% Incomplete command",
    "% Ambiguous command",
    "% Authorization failed",
];

pub struct SshSession {
    binary: PathBuf,
    connect_timeout: Duration,
}

impl Default for SshSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SshSession {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from(SSH_BINARY),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    fn build_command(&self, device: &Device, command: &str) -> Command {
        let mut ssh = Command::new(&self.binary);
        ssh.arg("-o")
            .arg("BatchMode=yes")
            .arg("-o")
            .arg(format!("ConnectTimeout={}", self.connect_timeout.as_secs().max(1)))
            .arg("-p")
            .arg(device.port.to_string());

        for option in &device.ssh_options {
            ssh.arg("-o").arg(option);
        }
        if let Some(username) = &device.username {
            ssh.arg("-l").arg(username);
        }

        ssh.arg(&device.hostname)
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        ssh
    }
}

#[async_trait]
impl DeviceSession for SshSession {
    async fn execute(&self, device: &Device, command: &str) -> Result<CommandOutput, SessionError> {
        let output = self
            .build_command(device, command)
            .output()
            .await
            .map_err(|e| SessionError::Connection(format!("cannot run {}: {e}", self.binary.display())))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        classify(output.status.code(), stdout, &stderr)
    }
}

/// Maps the client's exit status and output onto the session error taxonomy.
fn classify(code: Option<i32>, stdout: String, stderr: &str) -> Result<CommandOutput, SessionError> {
    let reason = |fallback: String| {
        stderr
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or(fallback)
    };

    match code {
        None => Err(SessionError::Connection(reason("ssh terminated by signal".to_string()))),
        Some(SSH_CONNECTION_FAILURE) => Err(SessionError::Connection(reason(format!(
            "ssh exited with status {SSH_CONNECTION_FAILURE}"
        )))),
        Some(0) => match rejected_line(&stdout) {
            Some(line) => Err(SessionError::Command(line.to_string())),
            None => Ok(CommandOutput::Text(stdout)),
        },
        Some(status) => Err(SessionError::Command(reason(format!("remote exited with status {status}")))),
    }
}

fn rejected_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| COMMAND_ERROR_MARKERS.iter().any(|marker| line.starts_with(marker)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
