// ============================================================
// Recurrent Encoder
// ============================================================
// A stack of bidirectional LSTM layers (batch-first). Layer 0
// reads d_input features; every later layer reads the
// 2·hidden concatenated outputs of the layer below. Dropout
// is applied between layers, not after the last one.
//
// The encoding is the last layer's final hidden state in each
// direction, concatenated:
//
//   forward  direction → output[:, seq-1, 0..hidden]
//   backward direction → output[:, 0,     hidden..2·hidden]
//
// Shapes: [B, seq, d_input] → [B, 2·hidden]

use burn::{
    nn::{BiLstm, BiLstmConfig, Dropout, DropoutConfig},
    prelude::*,
};

#[derive(Config, Debug)]
pub struct RecurrentEncoderConfig {
    pub d_input: usize,
    #[config(default = 128)]
    pub d_hidden: usize,
    #[config(default = 2)]
    pub num_layers: usize,
    #[config(default = 0.0)]
    pub dropout: f64,
}

impl RecurrentEncoderConfig {
    /// Width of the encoding: both directions concatenated.
    pub fn d_output(&self) -> usize {
        2 * self.d_hidden
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> RecurrentEncoder<B> {
        let layers: Vec<BiLstm<B>> = (0..self.num_layers)
            .map(|i| {
                let d_in = if i == 0 { self.d_input } else { self.d_output() };
                BiLstmConfig::new(d_in, self.d_hidden, true).init(device)
            })
            .collect();
        let dropout = DropoutConfig::new(self.dropout).init();
        RecurrentEncoder { layers, dropout, d_hidden: self.d_hidden }
    }
}

#[derive(Module, Debug)]
pub struct RecurrentEncoder<B: Backend> {
    pub layers:   Vec<BiLstm<B>>,
    pub dropout:  Dropout,
    pub d_hidden: usize,
}

impl<B: Backend> RecurrentEncoder<B> {
    /// Full output sequence of the top layer: [B, seq, 2·hidden]
    pub fn forward_sequence(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let last = self.layers.len().saturating_sub(1);
        let mut x = x;
        for (i, layer) in self.layers.iter().enumerate() {
            let (output, _state) = layer.forward(x, None);
            x = if i < last { self.dropout.forward(output) } else { output };
        }
        x
    }

    /// x: [B, seq, d_input] → [B, 2·hidden]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let output = self.forward_sequence(x);
        let [batch, seq_len, _] = output.dims();
        let hidden = self.d_hidden;

        let forward_final = output
            .clone()
            .slice([0..batch, seq_len - 1..seq_len, 0..hidden])
            .reshape([batch, hidden]);
        let backward_final = output
            .slice([0..batch, 0..1, hidden..2 * hidden])
            .reshape([batch, hidden]);

        Tensor::cat(vec![forward_final, backward_final], 1)
    }
}
