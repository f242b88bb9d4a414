// ============================================================
// Attention Blocks
// ============================================================
// SelfAttention  : one multi-head self-attention operator over
//                   a [B, seq, d_model] sequence. The classifier
//                   feeds it a length-1 sequence holding the
//                   flattened conv features.
//
// GlobalAttention: a learned Linear(D → D) followed by a
//                   softmax across the feature axis. The softmax
//                   output is a per-feature weight that scales
//                   the input element-wise.
//
// Reference: Vaswani et al. (2017) Attention Is All You Need

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::softmax,
};

// ─── Self-attention ───────────────────────────────────────────────────────────

#[derive(Config, Debug)]
pub struct SelfAttentionConfig {
    pub d_model: usize,
    #[config(default = 4)]
    pub num_heads: usize,
    #[config(default = 0.1)]
    pub dropout: f64,
}

impl SelfAttentionConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SelfAttention<B> {
        let mha = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        SelfAttention { mha }
    }
}

#[derive(Module, Debug)]
pub struct SelfAttention<B: Backend> {
    pub mha: MultiHeadAttention<B>,
}

impl<B: Backend> SelfAttention<B> {
    /// x: [batch, seq_len, d_model] → [batch, seq_len, d_model]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        self.mha.forward(MhaInput::self_attn(x)).context
    }
}

// ─── Global attention ─────────────────────────────────────────────────────────

#[derive(Config, Debug)]
pub struct GlobalAttentionConfig {
    pub d_features: usize,
}

impl GlobalAttentionConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GlobalAttention<B> {
        GlobalAttention {
            score: LinearConfig::new(self.d_features, self.d_features).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct GlobalAttention<B: Backend> {
    pub score: Linear<B>,
}

impl<B: Backend> GlobalAttention<B> {
    /// Soft weights over the features of each row; every row sums to 1.
    pub fn weights(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.score.forward(x), 1)
    }

    /// x: [batch, d_features] → [batch, d_features]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let weights = self.weights(x.clone());
        x * weights
    }
}
