//! Multi-provider routing for vision queries.

use async_trait::async_trait;

use crate::adb::Screenshot;

use super::client::ChatVisionClient;
use super::gemini::GeminiClient;
use super::reply::VisionReply;

/// One configured vision provider, already stripped down to "give me a
/// reply or nothing".
#[async_trait]
pub trait VisionBackend: Send + Sync {
    fn name(&self) -> &str;
    async fn ask(&self, image_base64: &str, prompt: &str) -> Option<VisionReply>;
}

#[async_trait]
impl VisionBackend for ChatVisionClient {
    fn name(&self) -> &str {
        self.model()
    }

    async fn ask(&self, image_base64: &str, prompt: &str) -> Option<VisionReply> {
        self.ask(image_base64, prompt, None).await
    }
}

#[async_trait]
impl VisionBackend for GeminiClient {
    fn name(&self) -> &str {
        self.model()
    }

    async fn ask(&self, image_base64: &str, prompt: &str) -> Option<VisionReply> {
        self.ask(image_base64, prompt).await
    }
}

/// The query seam the planner consumes: screenshot in, canonical reply or
/// nothing out.
#[async_trait]
pub trait VisionQuery: Send + Sync {
    async fn analyze(&self, shot: &Screenshot, prompt: &str) -> Option<VisionReply>;
}

/// Tries each configured backend in order until one yields a reply.
///
/// Primary first, then the secondary; when every backend misses the caller
/// receives `None` and applies its own scroll/retry/abort policy.
pub struct VisionRouter {
    backends: Vec<Box<dyn VisionBackend>>,
}

impl VisionRouter {
    pub fn new() -> Self {
        Self { backends: Vec::new() }
    }

    pub fn with_backend(mut self, backend: Box<dyn VisionBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn has_backend(&self) -> bool {
        !self.backends.is_empty()
    }
}

impl Default for VisionRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionQuery for VisionRouter {
    async fn analyze(&self, shot: &Screenshot, prompt: &str) -> Option<VisionReply> {
        // Encode once; every backend gets the same downscaled payload.
        let image_base64 = shot.to_base64_png();

        for (idx, backend) in self.backends.iter().enumerate() {
            if idx > 0 {
                tracing::info!("🔄 Switching to {}...", backend.name());
            }
            if let Some(reply) = backend.ask(&image_base64, prompt).await {
                return Some(reply);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn tiny_shot() -> Screenshot {
        Screenshot::new(DynamicImage::ImageRgb8(RgbImage::new(720, 1600)))
    }

    struct FailingBackend {
        calls: AtomicU32,
    }

    #[async_trait]
    impl VisionBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        async fn ask(&self, _image: &str, _prompt: &str) -> Option<VisionReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    struct ConfirmBackend;

    #[async_trait]
    impl VisionBackend for ConfirmBackend {
        fn name(&self) -> &str {
            "confirm"
        }

        async fn ask(&self, _image: &str, _prompt: &str) -> Option<VisionReply> {
            crate::model::reply::parse_reply(
                r#"{"found": true, "point": [300, 900], "button_text": "Confirm"}"#,
            )
        }
    }

    #[tokio::test]
    async fn test_secondary_backend_answers_when_primary_fails() {
        let router = VisionRouter::new()
            .with_backend(Box::new(FailingBackend {
                calls: AtomicU32::new(0),
            }))
            .with_backend(Box::new(ConfirmBackend));

        let reply = router.analyze(&tiny_shot(), "find confirm").await.unwrap();
        assert!(reply.found);
        assert_eq!(reply.button_text.as_deref(), Some("Confirm"));
        let pt = reply.point().unwrap();
        assert_eq!((pt.x, pt.y), (300, 900));
    }

    #[tokio::test]
    async fn test_all_backends_missing_yields_none() {
        let router = VisionRouter::new().with_backend(Box::new(FailingBackend {
            calls: AtomicU32::new(0),
        }));
        assert!(router.analyze(&tiny_shot(), "anything").await.is_none());
    }

    #[test]
    fn test_has_backend() {
        assert!(!VisionRouter::new().has_backend());
        assert!(VisionRouter::new()
            .with_backend(Box::new(ConfirmBackend))
            .has_backend());
    }
}
