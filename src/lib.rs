#![recursion_limit = "256"]

// ============================================================
// hybrid-classifier
// ============================================================
// A hybrid convolutional / recurrent / attention classifier
// assembled from Burn building blocks.
//
// Layers of the crate:
//
//   domain/: plain Rust shape bookkeeping and the Scorer trait
//             (no Burn types)
//   ml/    : every Burn module: conv features, SE gate,
//             self-attention, BiLSTM encoder, global attention,
//             the top-level model and the inferencer
//   infra/ : config persistence and tracing setup
//
// Forward pipeline (images [B, C, H, W] → scores [B, 1]):
//
//   ConvFeatureExtractor → SqueezeExcitation → flatten
//     → [B, 1, d_model] → SelfAttention → RecurrentEncoder
//     → GlobalAttention → Linear(2·hidden → 1)

pub mod domain;
pub mod infra;
pub mod ml;

pub use domain::shape::ImageShape;
pub use domain::traits::Scorer;
pub use infra::config_store::ConfigStore;
pub use ml::inferencer::Inferencer;
pub use ml::model::{HybridClassifier, HybridClassifierConfig};
