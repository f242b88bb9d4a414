// ============================================================
// Convolutional Feature Extractor
// ============================================================
// Two conv stages followed by dropout:
//
//   x ─► Conv2d(C_in→C1) ─► BatchNorm ─► ReLU ─► MaxPool 2x2
//     ─► Conv2d(C1→C2)   ─► BatchNorm ─► ReLU ─► MaxPool 2x2
//     ─► Dropout
//
// Convolutions are "same"-padded (kernel/2 on each side) so
// only the pooling layers change the spatial size.
//
// Shapes: [B, C_in, H, W] → [B, C2, ⌊H/4⌋, ⌊W/4⌋]

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig,
        Dropout, DropoutConfig,
        PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
};

#[derive(Config, Debug)]
pub struct ConvFeatureExtractorConfig {
    pub in_channels: usize,
    #[config(default = 32)]
    pub conv1_channels: usize,
    #[config(default = 64)]
    pub conv2_channels: usize,
    #[config(default = 3)]
    pub kernel_size: usize,
    #[config(default = 0.25)]
    pub dropout: f64,
}

impl ConvFeatureExtractorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvFeatureExtractor<B> {
        let conv1 = self.conv(self.in_channels, self.conv1_channels, device);
        let conv2 = self.conv(self.conv1_channels, self.conv2_channels, device);
        let norm1 = BatchNormConfig::new(self.conv1_channels).init(device);
        let norm2 = BatchNormConfig::new(self.conv2_channels).init(device);
        let pool  = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let dropout = DropoutConfig::new(self.dropout).init();

        tracing::debug!(
            "Conv extractor: {} → {} → {} channels, kernel {}",
            self.in_channels, self.conv1_channels, self.conv2_channels, self.kernel_size,
        );
        ConvFeatureExtractor { conv1, norm1, conv2, norm2, pool, dropout }
    }

    fn conv<B: Backend>(&self, d_in: usize, d_out: usize, device: &B::Device) -> Conv2d<B> {
        let pad = self.kernel_size / 2;
        Conv2dConfig::new([d_in, d_out], [self.kernel_size, self.kernel_size])
            .with_padding(PaddingConfig2d::Explicit(pad, pad))
            .init(device)
    }
}

#[derive(Module, Debug)]
pub struct ConvFeatureExtractor<B: Backend> {
    pub conv1:   Conv2d<B>,
    pub norm1:   BatchNorm<B, 2>,
    pub conv2:   Conv2d<B>,
    pub norm2:   BatchNorm<B, 2>,
    pub pool:    MaxPool2d,
    pub dropout: Dropout,
}

impl<B: Backend> ConvFeatureExtractor<B> {
    /// images: [batch, C_in, H, W] → [batch, C2, H/4, W/4]
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.pool.forward(relu(self.norm1.forward(self.conv1.forward(images))));
        let x = self.pool.forward(relu(self.norm2.forward(self.conv2.forward(x))));
        self.dropout.forward(x)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_output_shape_quarters_spatial_dims() {
        let device = Default::default();
        let conv: ConvFeatureExtractor<TestBackend> =
            ConvFeatureExtractorConfig::new(3).init(&device);

        let images = Tensor::<TestBackend, 4>::ones([2, 3, 16, 12], &device);
        assert_eq!(conv.forward(images).dims(), [2, 64, 4, 3]);
    }

    #[test]
    fn test_odd_spatial_dims_are_floored() {
        let device = Default::default();
        let conv: ConvFeatureExtractor<TestBackend> = ConvFeatureExtractorConfig::new(1)
            .with_conv1_channels(4)
            .with_conv2_channels(8)
            .init(&device);

        let images = Tensor::<TestBackend, 4>::ones([1, 1, 15, 10], &device);
        assert_eq!(conv.forward(images).dims(), [1, 8, 3, 2]);
    }

    #[test]
    fn test_output_is_non_negative_after_relu_and_pooling() {
        let device = Default::default();
        let conv: ConvFeatureExtractor<TestBackend> =
            ConvFeatureExtractorConfig::new(2).init(&device);

        let images = Tensor::<TestBackend, 4>::random(
            [2, 2, 8, 8],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );
        let min = conv.forward(images).min().into_scalar().elem::<f32>();
        assert!(min >= 0.0);
    }
}
