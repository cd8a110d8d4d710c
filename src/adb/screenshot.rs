//! Screen capture for the connected Android device.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Local};
use image::imageops::FilterType;
use image::DynamicImage;
use tokio::process::Command;
use tokio::time::timeout;

use super::connection::adb_args;

/// Bounded wait on the screenshot transport call.
const CAPTURE_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum encoded image width sent to the vision backends.
const MAX_ENCODE_WIDTH: u32 = 1024;

/// A decoded screenshot tagged with its capture time.
///
/// Owned by the calling step and discarded once the step's vision query
/// completes. A debug copy is written to disk but never read back.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub image: DynamicImage,
    pub captured_at: DateTime<Local>,
}

impl Screenshot {
    /// Wrap an already-decoded image, stamped with the current time.
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            captured_at: Local::now(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode as base64 PNG for a model payload.
    ///
    /// Images wider than 1024px are downscaled (aspect preserved, Lanczos3)
    /// to bound payload size and inference latency.
    pub fn to_base64_png(&self) -> String {
        let image = if self.image.width() > MAX_ENCODE_WIDTH {
            let ratio = MAX_ENCODE_WIDTH as f64 / self.image.width() as f64;
            let new_height = (self.image.height() as f64 * ratio) as u32;
            self.image
                .resize_exact(MAX_ENCODE_WIDTH, new_height, FilterType::Lanczos3)
        } else {
            self.image.clone()
        };

        let mut buffer = Cursor::new(Vec::new());
        let _ = image.write_to(&mut buffer, image::ImageFormat::Png);
        STANDARD.encode(buffer.into_inner())
    }
}

/// Capture a screenshot via `adb exec-out screencap -p`.
///
/// A debug copy named `screen_HH-MM-SS.png` is written to `output_dir`;
/// captures within the same second overwrite each other.
///
/// Returns `None` on any transport or decode failure. Callers treat a
/// missing image as a retryable condition and pause before trying again.
pub async fn capture(serial: Option<&str>, output_dir: &Path) -> Option<Screenshot> {
    let mut cmd = Command::new("adb");
    cmd.args(adb_args(serial));
    cmd.args(["exec-out", "screencap", "-p"]);

    let output = match timeout(CAPTURE_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::error!("Screenshot command failed: {}", e);
            return None;
        }
        Err(_) => {
            tracing::error!("Screenshot timed out after {:?}", CAPTURE_TIMEOUT);
            return None;
        }
    };

    if !output.status.success() {
        tracing::error!(
            "screencap exited nonzero: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let png_data = &output.stdout;
    if png_data.len() < 8 || &png_data[0..8] != b"\x89PNG\r\n\x1a\n" {
        tracing::error!("Invalid PNG data from screencap ({} bytes)", png_data.len());
        return None;
    }

    let image = match image::load_from_memory(png_data) {
        Ok(img) => img,
        Err(e) => {
            tracing::error!("Failed to decode screenshot: {}", e);
            return None;
        }
    };

    let shot = Screenshot::new(image);
    save_debug_copy(&shot, png_data, output_dir);
    Some(shot)
}

/// Persist the raw capture for debugging. Failures are logged and ignored.
fn save_debug_copy(shot: &Screenshot, png_data: &[u8], output_dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        tracing::warn!("Cannot create output dir {:?}: {}", output_dir, e);
        return;
    }

    let name = format!("screen_{}.png", shot.captured_at.format("%H-%M-%S"));
    let path = output_dir.join(name);
    if let Err(e) = std::fs::write(&path, png_data) {
        tracing::warn!("Cannot write debug screenshot {:?}: {}", path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn solid_image(width: u32, height: u32) -> Screenshot {
        let img = RgbImage::from_fn(width, height, |_, _| image::Rgb([40u8, 80u8, 120u8]));
        Screenshot::new(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn test_encode_downscales_wide_images() {
        let shot = solid_image(2048, 1000);
        let encoded = shot.to_base64_png();

        let bytes = STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 1024);
        assert_eq!(decoded.height(), 500);
    }

    #[test]
    fn test_encode_keeps_small_images() {
        let shot = solid_image(720, 1600);
        let encoded = shot.to_base64_png();

        let bytes = STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 720);
        assert_eq!(decoded.height(), 1600);
    }

    #[test]
    fn test_debug_name_format() {
        let shot = solid_image(8, 8);
        let name = format!("screen_{}.png", shot.captured_at.format("%H-%M-%S"));
        assert!(name.starts_with("screen_"));
        assert_eq!(name.len(), "screen_00-00-00.png".len());
    }
}
