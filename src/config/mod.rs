//! Static configuration data: prompt catalog and fallback coordinates.

pub mod fallbacks;
pub mod prompts;

pub use fallbacks::{fallback_point, LABEL_FLOW_FALLBACKS};
