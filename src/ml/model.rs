use anyhow::{ensure, Result};
use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::sigmoid,
};

use crate::domain::shape::ImageShape;
use crate::ml::{
    attention::{GlobalAttention, GlobalAttentionConfig, SelfAttention, SelfAttentionConfig},
    conv::{ConvFeatureExtractor, ConvFeatureExtractorConfig},
    recurrent::{RecurrentEncoder, RecurrentEncoderConfig},
    squeeze_excitation::{SqueezeExcitation, SqueezeExcitationConfig},
};

/// Number of 2x2 pooling stages in the conv extractor.
const POOL_STAGES: u32 = 2;

// #[derive(Config)] also provides Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct HybridClassifierConfig {
    pub in_channels: usize,
    pub height:      usize,
    pub width:       usize,
    #[config(default = 32)]
    pub conv1_channels: usize,
    #[config(default = 64)]
    pub conv2_channels: usize,
    #[config(default = 3)]
    pub kernel_size: usize,
    #[config(default = 0.25)]
    pub conv_dropout: f64,
    #[config(default = 16)]
    pub se_reduction: usize,
    #[config(default = 4)]
    pub num_heads: usize,
    #[config(default = 0.1)]
    pub attention_dropout: f64,
    #[config(default = 128)]
    pub hidden_size: usize,
    #[config(default = 2)]
    pub num_layers: usize,
    #[config(default = 0.0)]
    pub recurrent_dropout: f64,
}

impl HybridClassifierConfig {
    pub fn input_shape(&self) -> ImageShape {
        ImageShape::new(self.in_channels, self.height, self.width)
    }

    /// Shape of the conv feature map for one sample.
    pub fn feature_shape(&self) -> ImageShape {
        self.input_shape().pooled(self.conv2_channels, POOL_STAGES)
    }

    /// Embedding width seen by self-attention and the recurrent encoder.
    pub fn d_model(&self) -> usize {
        self.feature_shape().numel()
    }

    pub fn conv_config(&self) -> ConvFeatureExtractorConfig {
        ConvFeatureExtractorConfig::new(self.in_channels)
            .with_conv1_channels(self.conv1_channels)
            .with_conv2_channels(self.conv2_channels)
            .with_kernel_size(self.kernel_size)
            .with_dropout(self.conv_dropout)
    }

    pub fn channel_gate_config(&self) -> SqueezeExcitationConfig {
        SqueezeExcitationConfig::new(self.conv2_channels).with_reduction(self.se_reduction)
    }

    pub fn attention_config(&self) -> SelfAttentionConfig {
        SelfAttentionConfig::new(self.d_model())
            .with_num_heads(self.num_heads)
            .with_dropout(self.attention_dropout)
    }

    pub fn encoder_config(&self) -> RecurrentEncoderConfig {
        RecurrentEncoderConfig::new(self.d_model())
            .with_d_hidden(self.hidden_size)
            .with_num_layers(self.num_layers)
            .with_dropout(self.recurrent_dropout)
    }

    pub fn global_attention_config(&self) -> GlobalAttentionConfig {
        GlobalAttentionConfig::new(self.encoder_config().d_output())
    }

    /// Reject hyperparameters whose shape chain cannot be built.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.input_shape().is_non_empty(),
            "input shape {} must have non-zero channels, height and width",
            self.input_shape()
        );
        ensure!(
            self.feature_shape().is_non_empty(),
            "input {}x{} is too small: two 2x2 poolings need height and width >= 4",
            self.height, self.width
        );
        ensure!(
            self.conv1_channels > 0 && self.conv2_channels > 0,
            "conv channel counts must be non-zero"
        );
        ensure!(
            self.kernel_size % 2 == 1,
            "kernel_size must be odd to keep the spatial size, got {}",
            self.kernel_size
        );
        ensure!(self.se_reduction > 0, "se_reduction must be non-zero");
        ensure!(self.num_heads > 0, "num_heads must be non-zero");
        ensure!(
            self.d_model() % self.num_heads == 0,
            "d_model {} must be divisible by num_heads {}",
            self.d_model(), self.num_heads
        );
        ensure!(
            self.hidden_size > 0 && self.num_layers > 0,
            "hidden_size and num_layers must be non-zero"
        );
        for (name, p) in [
            ("conv_dropout", self.conv_dropout),
            ("attention_dropout", self.attention_dropout),
            ("recurrent_dropout", self.recurrent_dropout),
        ] {
            ensure!((0.0..1.0).contains(&p), "{name} must be in [0, 1), got {p}");
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> HybridClassifier<B> {
        let encoder = self.encoder_config();
        let model = HybridClassifier {
            features:         self.conv_config().init(device),
            channel_gate:     self.channel_gate_config().init(device),
            self_attention:   self.attention_config().init(device),
            encoder:          encoder.init(device),
            global_attention: self.global_attention_config().init(device),
            output:           LinearConfig::new(encoder.d_output(), 1).init(device),
            in_channels:      self.in_channels,
            height:           self.height,
            width:            self.width,
        };
        tracing::debug!(
            "HybridClassifier ready: input {}, d_model={}, hidden={}x{}, {} parameters",
            self.input_shape(), self.d_model(), self.hidden_size, self.num_layers,
            model.num_params(),
        );
        model
    }

    /// Validate, then build.
    pub fn try_init<B: Backend>(&self, device: &B::Device) -> Result<HybridClassifier<B>> {
        self.validate()?;
        Ok(self.init(device))
    }
}

#[derive(Module, Debug)]
pub struct HybridClassifier<B: Backend> {
    pub features:         ConvFeatureExtractor<B>,
    pub channel_gate:     SqueezeExcitation<B>,
    pub self_attention:   SelfAttention<B>,
    pub encoder:          RecurrentEncoder<B>,
    pub global_attention: GlobalAttention<B>,
    pub output:           Linear<B>,
    pub in_channels:      usize,
    pub height:           usize,
    pub width:            usize,
}

impl<B: Backend> HybridClassifier<B> {
    pub fn input_shape(&self) -> ImageShape {
        ImageShape::new(self.in_channels, self.height, self.width)
    }

    /// images: [batch, C, H, W] → scores: [batch, 1]
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.features.forward(images);
        let x = self.channel_gate.forward(x);

        // Flatten the feature map and present it as a length-1 sequence.
        let x = x.flatten::<2>(1, 3).unsqueeze_dim::<3>(1); // [batch, 1, d_model]
        tracing::trace!("attention input dims {:?}", x.dims());

        let x = self.self_attention.forward(x);
        let x = self.encoder.forward(x); // [batch, 2·hidden]
        let x = self.global_attention.forward(x);
        self.output.forward(x)
    }

    /// Sigmoid of the scores: [batch, 1] in (0, 1)
    pub fn predict_proba(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        sigmoid(self.forward(images))
    }

    /// Check `dims` against the configured input geometry.
    pub fn check_input(&self, dims: [usize; 4]) -> Result<()> {
        let [_, c, h, w] = dims;
        let expected = self.input_shape();
        ensure!(
            ImageShape::new(c, h, w) == expected,
            "input dims {dims:?} do not match configured shape {expected}"
        );
        Ok(())
    }

    /// Shape-checked forward pass.
    pub fn try_forward(&self, images: Tensor<B, 4>) -> Result<Tensor<B, 2>> {
        self.check_input(images.dims())?;
        Ok(self.forward(images))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    fn small_config() -> HybridClassifierConfig {
        HybridClassifierConfig::new(3, 16, 16)
            .with_conv1_channels(8)
            .with_conv2_channels(16)
            .with_se_reduction(4)
            .with_hidden_size(12)
    }

    #[test]
    fn test_d_model_follows_conv_geometry() {
        let cfg = HybridClassifierConfig::new(1, 28, 28);
        assert_eq!(cfg.d_model(), 64 * 7 * 7);
        assert_eq!(cfg.global_attention_config().d_features, 256);
    }

    #[test]
    fn test_forward_outputs_one_score_per_sample() {
        let device = Default::default();
        let model: HybridClassifier<TestBackend> = small_config().init(&device);

        for batch in [1, 4] {
            let images = Tensor::<TestBackend, 4>::random(
                [batch, 3, 16, 16], Distribution::Default, &device,
            );
            assert_eq!(model.forward(images).dims(), [batch, 1]);
        }
    }

    #[test]
    fn test_default_hyperparameters_forward() {
        let device = Default::default();
        let model: HybridClassifier<TestBackend> =
            HybridClassifierConfig::new(1, 8, 12).init(&device);

        let images = Tensor::<TestBackend, 4>::ones([2, 1, 8, 12], &device);
        assert_eq!(model.forward(images).dims(), [2, 1]);
    }

    #[test]
    fn test_predict_proba_in_unit_interval() {
        let device = Default::default();
        let model: HybridClassifier<TestBackend> = small_config().init(&device);

        let images = Tensor::<TestBackend, 4>::random(
            [3, 3, 16, 16], Distribution::Normal(0.0, 1.0), &device,
        );
        let probs: Vec<f32> = model.predict_proba(images).into_data().to_vec().unwrap();
        assert_eq!(probs.len(), 3);
        assert!(probs.iter().all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn test_try_forward_rejects_wrong_geometry() {
        let device = Default::default();
        let model: HybridClassifier<TestBackend> = small_config().init(&device);

        let images = Tensor::<TestBackend, 4>::ones([1, 1, 16, 16], &device);
        assert!(model.try_forward(images).is_err());

        let images = Tensor::<TestBackend, 4>::ones([1, 3, 16, 16], &device);
        assert!(model.try_forward(images).is_ok());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(HybridClassifierConfig::new(3, 32, 32).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_hyperparameters() {
        let base = || HybridClassifierConfig::new(3, 32, 32);

        assert!(HybridClassifierConfig::new(0, 32, 32).validate().is_err());
        assert!(HybridClassifierConfig::new(3, 3, 32).validate().is_err());
        assert!(base().with_kernel_size(4).validate().is_err());
        assert!(base().with_se_reduction(0).validate().is_err());
        assert!(base().with_num_heads(0).validate().is_err());
        // d_model = 64 * 8 * 8 = 4096, not divisible by 3
        assert!(base().with_num_heads(3).validate().is_err());
        assert!(base().with_hidden_size(0).validate().is_err());
        assert!(base().with_num_layers(0).validate().is_err());
        assert!(base().with_conv_dropout(1.0).validate().is_err());
        assert!(base().with_recurrent_dropout(-0.1).validate().is_err());
    }

    #[test]
    fn test_try_init_propagates_validation_error() {
        let device = Default::default();
        let err = HybridClassifierConfig::new(3, 2, 2)
            .try_init::<TestBackend>(&device)
            .unwrap_err();
        assert!(err.to_string().contains("too small"));
    }

    #[test]
    fn test_gradients_reach_every_stage() {
        type AdBackend = Autodiff<TestBackend>;
        let device = Default::default();
        let model: HybridClassifier<AdBackend> = small_config().init(&device);

        let images = Tensor::<AdBackend, 4>::random(
            [2, 3, 16, 16], Distribution::Normal(0.0, 1.0), &device,
        );
        let grads = model.forward(images).sum().backward();

        assert!(model.output.weight.grad(&grads).is_some());
        assert!(model.global_attention.score.weight.grad(&grads).is_some());
        assert!(model.features.conv1.weight.grad(&grads).is_some());
    }
}
