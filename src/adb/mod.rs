//! ADB transport: device discovery, input commands, and screen capture.

pub mod connection;
pub mod device;
pub mod input;
pub mod screenshot;

pub use connection::{discover_device, list_devices, AdbError, DeviceInfo};
pub use device::{AdbDevice, DeviceControl};
pub use screenshot::Screenshot;
