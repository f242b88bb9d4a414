// ============================================================
// Squeeze-and-Excitation Channel Gate
// ============================================================
// Re-weights the channels of a feature map:
//
//   squeeze:  mean over H and W        [B, C, H, W] → [B, C]
//   excite:   Linear(C → C/r) → ReLU → Linear(C/r → C) → sigmoid
//   scale:    x * w  (w broadcast over H and W)
//
// The bottleneck width is C/r, clamped to at least 1.
//
// Reference: Hu et al. (2018) Squeeze-and-Excitation Networks

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

#[derive(Config, Debug)]
pub struct SqueezeExcitationConfig {
    pub channels: usize,
    #[config(default = 16)]
    pub reduction: usize,
}

impl SqueezeExcitationConfig {
    /// Width of the excitation bottleneck.
    pub fn bottleneck(&self) -> usize {
        (self.channels / self.reduction.max(1)).max(1)
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> SqueezeExcitation<B> {
        let hidden = self.bottleneck();
        SqueezeExcitation {
            reduce: LinearConfig::new(self.channels, hidden).init(device),
            expand: LinearConfig::new(hidden, self.channels).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct SqueezeExcitation<B: Backend> {
    pub reduce: Linear<B>,
    pub expand: Linear<B>,
}

impl<B: Backend> SqueezeExcitation<B> {
    /// Per-channel gate values in (0, 1): [B, C, H, W] → [B, C]
    pub fn channel_weights(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch, channels, _, _] = x.dims();
        let squeezed = x.mean_dim(3).mean_dim(2).reshape([batch, channels]);
        sigmoid(self.expand.forward(relu(self.reduce.forward(squeezed))))
    }

    /// x: [B, C, H, W] → [B, C, H, W]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let [batch, channels, _, _] = x.dims();
        let weights = self
            .channel_weights(x.clone())
            .reshape([batch, channels, 1, 1]);
        x * weights
    }
}
