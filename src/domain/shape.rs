// ============================================================
// ImageShape Domain Type
// ============================================================
// The per-sample geometry of the model input: channels,
// height and width. Batch size is not part of it; any batch
// size flows through the same weights.
//
// The convolutional extractor keeps the spatial size through
// each 3x3 padded convolution and halves it (floor) at each
// 2x2 max-pool, so after two stages:
//
//   [C, H, W] → [C2, ⌊⌊H/2⌋/2⌋, ⌊⌊W/2⌋/2⌋]
//
// Flattening that map gives the embedding width the attention
// block and the recurrent encoder are built for.

use serde::{Deserialize, Serialize};

/// Channels × height × width of one input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    pub channels: usize,
    pub height:   usize,
    pub width:    usize,
}

impl ImageShape {
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Self { channels, height, width }
    }

    /// Number of scalars in one sample.
    pub fn numel(&self) -> usize {
        self.channels * self.height * self.width
    }

    /// Shape after `stages` rounds of 2x2 / stride-2 pooling
    /// with the channel count replaced by `channels`.
    pub fn pooled(&self, channels: usize, stages: u32) -> Self {
        let mut height = self.height;
        let mut width  = self.width;
        for _ in 0..stages {
            height /= 2;
            width  /= 2;
        }
        Self { channels, height, width }
    }

    /// True when every dimension is non-zero.
    pub fn is_non_empty(&self) -> bool {
        self.channels > 0 && self.height > 0 && self.width > 0
    }

    /// Tensor dims for a batch of this shape: [batch, C, H, W].
    pub fn batch_dims(&self, batch_size: usize) -> [usize; 4] {
        [batch_size, self.channels, self.height, self.width]
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.channels, self.height, self.width)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numel() {
        assert_eq!(ImageShape::new(3, 32, 32).numel(), 3 * 32 * 32);
    }

    #[test]
    fn test_two_pool_stages_quarter_the_spatial_dims() {
        let s = ImageShape::new(1, 28, 28).pooled(64, 2);
        assert_eq!(s, ImageShape::new(64, 7, 7));
        assert_eq!(s.numel(), 64 * 49);
    }

    #[test]
    fn test_odd_dims_floor_at_each_stage() {
        // 15 → 7 → 3, 10 → 5 → 2
        let s = ImageShape::new(2, 15, 10).pooled(8, 2);
        assert_eq!(s, ImageShape::new(8, 3, 2));
    }

    #[test]
    fn test_too_small_input_collapses_to_empty() {
        let s = ImageShape::new(1, 3, 8).pooled(4, 2);
        assert_eq!(s.height, 0);
        assert!(!s.is_non_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(ImageShape::new(3, 64, 48).to_string(), "3x64x48");
    }
}
