//! VisionModel trait abstraction

use crate::error::DetectionResult;
use crate::image::ImageData;
use async_trait::async_trait;

/// Something that can look at a board photo and answer with the raw
/// grid-or-error JSON text.
/// Implemented by `GeminiClient` and `MockVisionModel`.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn generate(&self, image: &ImageData) -> DetectionResult<String>;
}
