/*
 * @Description  : Layer 模块 - 推理用的层
 *
 * 所有层统一为 Batch-First 布局：输入/输出均为 [batch, C, H, W]。
 * 每个层都会保留最近一次前向传播的输出，供激活值采集使用。
 */

mod batch_norm;
mod conv2d;
mod dropout;
mod inception;
mod max_pool2d;
mod relu;

pub use batch_norm::BatchNorm2d;
pub use conv2d::Conv2d;
pub use dropout::Dropout;
pub use inception::{Inception, InceptionConfig};
pub use max_pool2d::MaxPool2d;
pub use relu::ReLU;

use super::NetError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 层的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Convolution,
    MaxPooling,
    Activation,
    Dropout,
    Concatenation,
    BatchNormalization,
}

impl LayerKind {
    /// 类型标签，沿用Torch的层名，会出现在日志与网络摘要里
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Convolution => "nn.SpatialConvolution",
            Self::MaxPooling => "nn.SpatialMaxPooling",
            Self::Activation => "nn.ReLU",
            Self::Dropout => "nn.Dropout",
            Self::Concatenation => "nn.Inception",
            Self::BatchNormalization => "nn.SpatialBatchNormalization",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[enum_dispatch]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Conv2d(Conv2d),
    MaxPool2d(MaxPool2d),
    ReLU(ReLU),
    Dropout(Dropout),
    BatchNorm2d(BatchNorm2d),
    Inception(Inception),
}

#[enum_dispatch(Layer)]
pub trait TraitLayer {
    /// 层的种类（只读，采集激活值时不会改动层本身）
    fn kind(&self) -> LayerKind;

    /// 计算本层输出，并保留一份供`output()`读取
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError>;

    /// 最近一次前向传播的输出；尚未推理过则为None
    fn output(&self) -> Option<&Tensor>;

    fn clear_output(&mut self);

    /// 给定输入通道数时本层的输出通道数
    fn output_channels(&self, input_channels: usize) -> usize;
}

/// 校验输入为4维 [batch, C, H, W]，并返回各维大小
pub(in crate::nn) fn expect_4d(
    layer: &'static str,
    input: &Tensor,
) -> Result<(usize, usize, usize, usize), NetError> {
    match *input.shape() {
        [b, c, h, w] => Ok((b, c, h, w)),
        _ => Err(NetError::NotFourDimensional {
            layer,
            got: input.shape().to_vec(),
        }),
    }
}

/// 池化/卷积的输出尺寸：`(size + 2*pad - kernel) / stride + 1`（向下取整）
pub(in crate::nn) fn output_size(
    layer: &'static str,
    size: usize,
    kernel: usize,
    stride: usize,
    pad: usize,
) -> Result<usize, NetError> {
    let padded = size + 2 * pad;
    if padded < kernel {
        return Err(NetError::InvalidOperation(format!(
            "{layer}的输入尺寸{size}（填充{pad}）小于窗口大小{kernel}"
        )));
    }
    Ok((padded - kernel) / stride + 1)
}
