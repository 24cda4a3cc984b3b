use super::{LayerKind, TraitLayer};
use crate::nn::NetError;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// ReLU 激活层：max(0, x)，逐元素计算，不改变形状
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReLU {
    #[serde(skip)]
    output: Option<Tensor>,
}

impl ReLU {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraitLayer for ReLU {
    fn kind(&self) -> LayerKind {
        LayerKind::Activation
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        let data = input
            .data_as_slice()
            .into_iter()
            .map(|x| x.max(0.))
            .collect::<Vec<_>>();
        let output = Tensor::new(&data, input.shape());
        self.output = Some(output.clone());
        Ok(output)
    }

    fn output(&self) -> Option<&Tensor> {
        self.output.as_ref()
    }

    fn clear_output(&mut self) {
        self.output = None;
    }

    fn output_channels(&self, input_channels: usize) -> usize {
        input_channels
    }
}
