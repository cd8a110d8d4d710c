//! Declutter Droid: an AI-vision janitor for a cluttered Gmail inbox.
//!
//! Drives a real Android device over ADB, looks at screenshots with a
//! vision-language model, and either unsubscribes from promotional email
//! or labels it Marketing. The control loop is stateless between steps:
//! capture, ask, act, repeat.

pub mod adb;
pub mod agent;
pub mod config;
pub mod model;
pub mod settings;

pub use adb::{discover_device, AdbDevice, DeviceControl, Screenshot};
pub use agent::{CleanupStrategy, DeclutterAgent, RunSummary};
pub use model::{ChatVisionClient, GeminiClient, ProviderConfig, VisionQuery, VisionRouter};
pub use settings::Settings;
