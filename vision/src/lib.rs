//! Board detection from photographs.
//!
//! A [`VisionModel`] turns an image into the model's raw JSON reply; this
//! crate validates that reply and converts the 8x8 grid into a FEN string.
//!
//! ```no_run
//! use vision::{detect, GeminiClient, GeminiConfig, ImageData};
//!
//! # async fn run() -> Result<(), vision::DetectionError> {
//! let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
//! let image = ImageData::from_path("board.jpg")?;
//! let fen = detect(&client, &image).await?;
//! println!("{}", fen);
//! # Ok(())
//! # }
//! ```

mod error;
mod gemini;
mod grid;
mod image;
mod prompt;
mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{DetectionError, DetectionResult};
pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use grid::{grid_to_fen, interpret_reply, piece_letter, DETECTED_FEN_SUFFIX};
pub use image::ImageData;
pub use prompt::DETECTION_PROMPT;
pub use traits::VisionModel;

/// Run one detection: a single model call, no retries.
pub async fn detect<M>(model: &M, image: &ImageData) -> DetectionResult<String>
where
    M: VisionModel + ?Sized,
{
    let reply = model.generate(image).await.map_err(|e| {
        tracing::warn!("Vision model call failed: {}", e);
        e
    })?;
    tracing::debug!("Vision model replied with {} bytes", reply.len());
    interpret_reply(&reply)
}
