//! Vision model clients, reply parsing, and provider routing.

pub mod client;
pub mod gemini;
pub mod reply;
pub mod router;

pub use client::{ChatVisionClient, ModelError, ProviderConfig};
pub use gemini::GeminiClient;
pub use reply::{parse_reply, Point, VisionReply, ICON_ZONE_MIN_X, SAFE_TAP_X};
pub use router::{VisionBackend, VisionQuery, VisionRouter};
