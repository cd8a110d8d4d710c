//! Input commands for driving the device UI.
//!
//! Each function issues exactly one shell command (launch is the force-stop +
//! relaunch pair) and reports success or failure. Retries are a caller
//! concern; none happen at this layer.

use std::time::Duration;

use tokio::process::Command;
use tokio::time::sleep;

use super::connection::adb_args;

/// Run one `adb shell` command and report whether it exited cleanly.
async fn shell(serial: Option<&str>, args: &[&str]) -> bool {
    let mut cmd = Command::new("adb");
    cmd.args(adb_args(serial));
    cmd.arg("shell");
    cmd.args(args);

    match cmd.output().await {
        Ok(output) => output.status.success(),
        Err(e) => {
            tracing::error!("adb shell {:?} failed: {}", args, e);
            false
        }
    }
}

/// Tap at the given screen coordinates.
pub async fn tap(serial: Option<&str>, x: i32, y: i32) -> bool {
    shell(serial, &["input", "tap", &x.to_string(), &y.to_string()]).await
}

/// Swipe from start to end over the given duration.
pub async fn swipe(
    serial: Option<&str>,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    duration_ms: u64,
) -> bool {
    shell(
        serial,
        &[
            "input",
            "swipe",
            &x1.to_string(),
            &y1.to_string(),
            &x2.to_string(),
            &y2.to_string(),
            &duration_ms.to_string(),
        ],
    )
    .await
}

/// Long-press at a point, implemented as a swipe with equal endpoints.
pub async fn long_press(serial: Option<&str>, x: i32, y: i32, duration_ms: u64) -> bool {
    swipe(serial, x, y, x, y, duration_ms).await
}

/// Press the Android back button.
pub async fn press_back(serial: Option<&str>) -> bool {
    shell(serial, &["input", "keyevent", "4"]).await
}

/// Type text into the currently focused input field.
///
/// `input text` does not accept literal spaces, so they are escaped as `%s`.
pub async fn type_text(serial: Option<&str>, text: &str) -> bool {
    let safe_text = text.replace(' ', "%s");
    let quoted = format!("'{}'", safe_text);
    shell(serial, &["input", "text", &quoted]).await
}

/// Force-stop a package and relaunch it from a cold state.
pub async fn launch_app(serial: Option<&str>, package: &str) -> bool {
    tracing::info!("Restarting {}...", package);

    if !shell(serial, &["am", "force-stop", package]).await {
        return false;
    }
    sleep(Duration::from_secs(1)).await;

    shell(
        serial,
        &[
            "monkey",
            "-p",
            package,
            "-c",
            "android.intent.category.LAUNCHER",
            "1",
        ],
    )
    .await
}
