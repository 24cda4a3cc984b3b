use super::{LayerKind, TraitLayer};
use crate::nn::NetError;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// Dropout 层
///
/// 本库只做推理，故前向传播恒为恒等映射（即 Torch 的 evaluate 模式）；
/// 丢弃概率`p`仅作为网络结构的一部分被保存下来。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dropout {
    p: f32,
    #[serde(skip)]
    output: Option<Tensor>,
}

impl Dropout {
    /// `p`须在[0, 1)内
    pub fn new(p: f32) -> Result<Self, NetError> {
        if !(0. ..1.).contains(&p) {
            return Err(NetError::InvalidOperation(format!(
                "Dropout 概率须在[0, 1)内，得到{p}"
            )));
        }
        Ok(Self { p, output: None })
    }

    pub const fn p(&self) -> f32 {
        self.p
    }
}

impl TraitLayer for Dropout {
    fn kind(&self) -> LayerKind {
        LayerKind::Dropout
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        self.output = Some(input.clone());
        Ok(input.clone())
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
