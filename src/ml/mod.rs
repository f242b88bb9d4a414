// ============================================================
// ML / Model Layer (Burn)
// ============================================================
// All Burn module code lives here. Each block has a
// #[derive(Config)] struct whose init() builds the
// #[derive(Module)] struct holding the learned parameters.
//
//   conv.rs              : two conv/BN/ReLU/pool stages + dropout
//   squeeze_excitation.rs: per-channel sigmoid gate
//   attention.rs         : multi-head self-attention and the
//                           softmax global attention
//   recurrent.rs         : stacked bidirectional LSTM encoder
//   model.rs             : HybridClassifier wiring the blocks
//   inferencer.rs        : flat-buffer scoring on a chosen backend
//
// Reference: Burn Book §3 (Building Blocks)

/// Convolutional feature extractor
pub mod conv;

/// Squeeze-and-excitation channel re-weighting
pub mod squeeze_excitation;

/// Self-attention and global attention blocks
pub mod attention;

/// Multi-layer bidirectional LSTM encoder
pub mod recurrent;

/// Top-level classifier and its config
pub mod model;

/// Scoring engine over raw pixel buffers
pub mod inferencer;
