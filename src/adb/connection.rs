//! ADB connection management and device discovery.

use thiserror::Error;
use tokio::process::Command;

/// Information about a connected device as reported by `adb devices`.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub serial: String,
    pub status: String,
}

/// ADB transport errors.
#[derive(Error, Debug)]
pub enum AdbError {
    #[error("ADB bridge unreachable: {0}")]
    BridgeUnreachable(String),
    #[error("No device connected")]
    NoDevice,
    #[error("Command execution failed: {0}")]
    CommandFailed(String),
}

/// List all devices attached to the local ADB server.
pub async fn list_devices() -> Result<Vec<DeviceInfo>, AdbError> {
    let output = Command::new("adb")
        .args(["devices"])
        .output()
        .await
        .map_err(|e| AdbError::BridgeUnreachable(e.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut devices = Vec::new();

    // First line is the "List of devices attached" header
    for line in stdout.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 2 && parts[1] == "device" {
            devices.push(DeviceInfo {
                serial: parts[0].to_string(),
                status: parts[1].to_string(),
            });
        }
    }

    Ok(devices)
}

/// Select the first attached device.
///
/// Returns [`AdbError::NoDevice`] when the list is empty and
/// [`AdbError::BridgeUnreachable`] when the ADB server cannot be reached.
pub async fn discover_device() -> Result<DeviceInfo, AdbError> {
    let devices = list_devices().await?;
    devices.into_iter().next().ok_or(AdbError::NoDevice)
}

/// Get ADB command arguments with an optional device serial.
pub(crate) fn adb_args(serial: Option<&str>) -> Vec<String> {
    match serial {
        Some(id) => vec!["-s".to_string(), id.to_string()],
        None => Vec::new(),
    }
}
