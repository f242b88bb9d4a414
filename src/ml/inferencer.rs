// ============================================================
// Inferencer
// ============================================================
use std::path::Path;

use anyhow::{anyhow, ensure, Result};
use burn::prelude::*;

use crate::domain::{shape::ImageShape, traits::Scorer};
use crate::infra::config_store::ConfigStore;
use crate::ml::model::{HybridClassifier, HybridClassifierConfig};

pub struct Inferencer<B: Backend> {
    model:  HybridClassifier<B>,
    shape:  ImageShape,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(config: &HybridClassifierConfig, device: B::Device) -> Result<Self> {
        let model = config.try_init(&device)?;
        tracing::info!(
            "Inferencer ready: input {}, {} parameters",
            config.input_shape(),
            model.num_params(),
        );
        Ok(Self { model, shape: config.input_shape(), device })
    }

    /// Build from a `model_config.json` written by [`ConfigStore::save`].
    pub fn from_config_file(path: impl AsRef<Path>, device: B::Device) -> Result<Self> {
        let config = ConfigStore::load_from(path)?;
        Self::new(&config, device)
    }

    /// Wrap an already built model.
    pub fn from_model(model: HybridClassifier<B>, device: B::Device) -> Self {
        let shape = model.input_shape();
        Self { model, shape, device }
    }

    pub fn model(&self) -> &HybridClassifier<B> {
        &self.model
    }

    /// Turn a flat row-major buffer into a [batch, C, H, W] tensor.
    fn to_tensor(&self, pixels: &[f32], batch_size: usize) -> Result<Tensor<B, 4>> {
        ensure!(batch_size > 0, "batch_size must be non-zero");
        let expected = batch_size * self.shape.numel();
        ensure!(
            pixels.len() == expected,
            "expected {expected} values for {batch_size} image(s) of shape {}, got {}",
            self.shape,
            pixels.len()
        );
        Ok(Tensor::<B, 1>::from_floats(pixels, &self.device)
            .reshape(self.shape.batch_dims(batch_size)))
    }
}

impl<B: Backend> Scorer for Inferencer<B> {
    fn input_shape(&self) -> ImageShape {
        self.shape
    }

    fn score(&self, pixels: &[f32], batch_size: usize) -> Result<Vec<f32>> {
        let images = self.to_tensor(pixels, batch_size)?;
        let scores = self.model.try_forward(images)?;

        let scores = scores
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("cannot read scores: {e:?}"))?;
        tracing::debug!("Scored {} image(s)", scores.len());
        Ok(scores)
    }
}
