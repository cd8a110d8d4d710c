//! Device control seam and its ADB implementation.

use std::path::PathBuf;

use async_trait::async_trait;

use super::input;
use super::screenshot::{self, Screenshot};

/// Commands the planner can issue against a device.
///
/// Every command is fire-and-forget: the return value is the shell command's
/// exit status, nothing more. Commands mutate real UI state and are not
/// idempotent; a duplicate tap can hit a different element if the screen has
/// already changed.
#[async_trait]
pub trait DeviceControl: Send + Sync {
    async fn tap(&self, x: i32, y: i32) -> bool;
    async fn swipe(&self, x1: i32, y1: i32, x2: i32, y2: i32, duration_ms: u64) -> bool;
    async fn long_press(&self, x: i32, y: i32, duration_ms: u64) -> bool;
    async fn press_back(&self) -> bool;
    async fn type_text(&self, text: &str) -> bool;
    async fn launch_app(&self, package: &str) -> bool;
    async fn capture(&self) -> Option<Screenshot>;
}

/// A single ADB-attached device.
pub struct AdbDevice {
    serial: Option<String>,
    output_dir: PathBuf,
}

impl AdbDevice {
    /// Create a device handle for a discovered serial.
    ///
    /// `output_dir` receives the timestamped debug screenshots.
    pub fn new(serial: Option<String>, output_dir: PathBuf) -> Self {
        Self { serial, output_dir }
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }
}

#[async_trait]
impl DeviceControl for AdbDevice {
    async fn tap(&self, x: i32, y: i32) -> bool {
        input::tap(self.serial(), x, y).await
    }

    async fn swipe(&self, x1: i32, y1: i32, x2: i32, y2: i32, duration_ms: u64) -> bool {
        input::swipe(self.serial(), x1, y1, x2, y2, duration_ms).await
    }

    async fn long_press(&self, x: i32, y: i32, duration_ms: u64) -> bool {
        input::long_press(self.serial(), x, y, duration_ms).await
    }

    async fn press_back(&self) -> bool {
        input::press_back(self.serial()).await
    }

    async fn type_text(&self, text: &str) -> bool {
        input::type_text(self.serial(), text).await
    }

    async fn launch_app(&self, package: &str) -> bool {
        input::launch_app(self.serial(), package).await
    }

    async fn capture(&self) -> Option<Screenshot> {
        screenshot::capture(self.serial(), &self.output_dir).await
    }
}
