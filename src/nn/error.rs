//! 网络构建、推理与持久化的错误类型定义

use crate::errors::TensorError;
use std::path::PathBuf;
use thiserror::Error;

/// 网络相关错误
#[derive(Debug, Error)]
pub enum NetError {
    /// Inception模块各分支输出通道数之和与声明的输出通道数不一致
    #[error("Inception输出通道数不符：声明为{expected}，各分支之和为{computed}")]
    ChannelMismatch { expected: usize, computed: usize },

    /// 输入形状不符合层的要求
    #[error("{layer}形状不符：期望{expected:?}，实际{got:?}")]
    ShapeMismatch {
        layer: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 输入（或参数）不是4维张量
    #[error("{layer}须为4维张量[batch, C, H, W]，实际形状为{got:?}")]
    NotFourDimensional {
        layer: &'static str,
        got: Vec<usize>,
    },

    /// 非法参数或非法操作
    #[error("非法操作：{0}")]
    InvalidOperation(String),

    /// 网络中没有任何层
    #[error("网络为空，无法推理")]
    EmptyNetwork,

    /// IO 错误
    #[error("读写`{path}`失败：{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 模型（反）序列化失败
    #[error("模型编解码失败：{0}")]
    Codec(String),

    #[error(transparent)]
    Tensor(#[from] TensorError),
}
