// ============================================================
// Core Traits
// ============================================================
// The application-facing abstraction over "something that
// turns a flat batch of images into one score per image".
//
// Implementations:
//   - Inferencer<B> → runs the HybridClassifier on a Burn backend

use anyhow::Result;

use crate::domain::shape::ImageShape;

// ─── Scorer ───────────────────────────────────────────────────────────────────
/// Any component that scores a batch of images laid out as a
/// contiguous row-major `[batch, C, H, W]` buffer.
pub trait Scorer {
    /// Geometry of one input sample.
    fn input_shape(&self) -> ImageShape;

    /// One raw score (logit) per image.
    fn score(&self, pixels: &[f32], batch_size: usize) -> Result<Vec<f32>>;

    /// One probability in (0, 1) per image.
    fn probabilities(&self, pixels: &[f32], batch_size: usize) -> Result<Vec<f32>> {
        Ok(self
            .score(pixels, batch_size)?
            .into_iter()
            .map(|logit| 1.0 / (1.0 + (-logit).exp()))
            .collect())
    }

    /// Positive / negative decision per image.
    fn classify(&self, pixels: &[f32], batch_size: usize, threshold: f32) -> Result<Vec<bool>> {
        Ok(self
            .probabilities(pixels, batch_size)?
            .into_iter()
            .map(|p| p >= threshold)
            .collect())
    }
}
