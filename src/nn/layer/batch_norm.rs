use super::{LayerKind, TraitLayer, expect_4d};
use crate::nn::NetError;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// BatchNorm2d 层（推理模式，使用运行时统计量）
///
/// `y = (x - running_mean) / sqrt(running_var + eps) * gamma + beta`，按通道计算。
/// 载入预训练模型后通常会被`strip_incompatible_layers`剔除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchNorm2d {
    eps: f32,
    running_mean: Vec<f32>,
    running_var: Vec<f32>,
    gamma: Vec<f32>,
    beta: Vec<f32>,
    #[serde(skip)]
    output: Option<Tensor>,
}

impl BatchNorm2d {
    /// 恒等初始化：均值0、方差1、gamma为1、beta为0
    pub fn new(channels: usize) -> Self {
        Self {
            eps: 1e-5,
            running_mean: vec![0.; channels],
            running_var: vec![1.; channels],
            gamma: vec![1.; channels],
            beta: vec![0.; channels],
            output: None,
        }
    }

    /// 用已有统计量创建，四个向量长度须一致
    pub fn from_statistics(
        running_mean: Vec<f32>,
        running_var: Vec<f32>,
        gamma: Vec<f32>,
        beta: Vec<f32>,
        eps: f32,
    ) -> Result<Self, NetError> {
        let channels = running_mean.len();
        for (name, v) in [("running_var", &running_var), ("gamma", &gamma), ("beta", &beta)] {
            if v.len() != channels {
                return Err(NetError::InvalidOperation(format!(
                    "BatchNorm2d 的{name}长度{}与running_mean长度{channels}不符",
                    v.len()
                )));
            }
        }
        Ok(Self {
            eps,
            running_mean,
            running_var,
            gamma,
            beta,
            output: None,
        })
    }

    pub fn channels(&self) -> usize {
        self.running_mean.len()
    }
}

impl TraitLayer for BatchNorm2d {
    fn kind(&self) -> LayerKind {
        LayerKind::BatchNormalization
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        let (batch_size, channels, h, w) = expect_4d("BatchNorm2d", input)?;
        if channels != self.channels() {
            return Err(NetError::ShapeMismatch {
                layer: "BatchNorm2d",
                expected: vec![self.channels()],
                got: vec![channels],
            });
        }
        let mut output = input.clone();
        for c in 0..channels {
            let scale = self.gamma[c] / (self.running_var[c] + self.eps).sqrt();
            let shift = self.beta[c] - self.running_mean[c] * scale;
            for b in 0..batch_size {
                for y in 0..h {
                    for x in 0..w {
                        output[[b, c, y, x]] = output[[b, c, y, x]] * scale + shift;
                    }
                }
            }
        }
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
