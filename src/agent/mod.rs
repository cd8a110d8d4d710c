//! Agent layer: retry engine, screen classification, and the workflows.

pub mod declutter;
pub mod retry;
pub mod screen;

pub use declutter::{CleanupStrategy, DeclutterAgent, RunSummary, GMAIL_PACKAGE};
pub use retry::{Corrective, RetryPolicy};
pub use screen::ScreenState;
