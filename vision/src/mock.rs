//! Canned vision model for tests

use crate::error::{DetectionError, DetectionResult};
use crate::image::ImageData;
use crate::traits::VisionModel;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock model - only compiled in test mode or with the mock feature.
/// Replies are served in order; the last one repeats.
#[derive(Clone, Default)]
pub struct MockVisionModel {
    replies: Arc<Mutex<Vec<DetectionResult<String>>>>,
    call_log: Arc<Mutex<Vec<ImageData>>>,
    delay: Option<Duration>,
}

impl MockVisionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw reply text, as the model would send it.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.lock_replies().push(Ok(text.into()));
        self
    }

    /// Queue a transport-level failure.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.lock_replies()
            .push(Err(DetectionError::General(message.into())));
        self
    }

    /// Sleep before answering, to exercise in-flight handling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.call_log.lock().map(|log| log.len()).unwrap_or(0)
    }

    pub fn last_image(&self) -> Option<ImageData> {
        self.call_log.lock().ok()?.last().cloned()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, Vec<DetectionResult<String>>> {
        self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VisionModel for MockVisionModel {
    async fn generate(&self, image: &ImageData) -> DetectionResult<String> {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(image.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut replies = self.lock_replies();
        match replies.len() {
            0 => Err(DetectionError::General(
                "mock reply not configured".to_string(),
            )),
            1 => replies[0].clone(),
            _ => replies.remove(0),
        }
    }
}
