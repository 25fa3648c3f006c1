//! Replays previously captured command output.
//!
//! Layout: `<root>/<device name>/<command slug>.json` or `.txt`, where the slug
//! is the command with whitespace replaced by `_` (`show_cdp_neighbors.txt`).
//! A `.json` capture is returned as structured output and wins over `.txt`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use machunt_common::inventory::Device;
use machunt_common::session::{CommandOutput, DeviceSession, SessionError};

pub struct CaptureSession {
    root: PathBuf,
}

impl CaptureSession {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

pub fn command_slug(command: &str) -> String {
    command.split_whitespace().collect::<Vec<&str>>().join("_")
}

#[async_trait]
impl DeviceSession for CaptureSession {
    async fn execute(&self, device: &Device, command: &str) -> Result<CommandOutput, SessionError> {
        let device_dir = self.root.join(&device.name);
        let is_dir = tokio::fs::metadata(&device_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(SessionError::Connection(format!(
                "no captures for {} in {}",
                device.name,
                self.root.display()
            )));
        }

        let slug = command_slug(command);
        let json_path = device_dir.join(format!("{slug}.json"));
        if let Some(content) = read_if_present(&json_path).await? {
            let value = serde_json::from_str(&content)
                .map_err(|e| SessionError::Parse(format!("{}: {e}", json_path.display())))?;
            return Ok(CommandOutput::Structured(value));
        }

        let text_path = device_dir.join(format!("{slug}.txt"));
        match read_if_present(&text_path).await? {
            Some(content) => Ok(CommandOutput::Text(content)),
            None => Err(SessionError::Command(format!(
                "no capture of '{command}' for {}",
                device.name
            ))),
        }
    }
}

async fn read_if_present(path: &Path) -> Result<Option<String>, SessionError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SessionError::Connection(format!("{}: {e}", path.display()))),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
