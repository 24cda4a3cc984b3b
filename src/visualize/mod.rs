/*
 * @Description  : 滤波器响应（各层激活值）的采集与逐通道可视化导出
 *
 * 数据流：
 *   Network::forward → capture_activations → Exporter::export
 *                      （有序的LayerActivation）  （显示窗口 / 分层目录下的PNG）
 */

mod capture;
mod exporter;
mod figure;
mod target;

pub use capture::{LayerActivation, capture_activations};
pub use exporter::{ExportReport, Exporter, LayerScope, OutputMode};
pub use figure::{FigureBoard, FigureDirectory, FigureSink};
pub use target::{DisplayTarget, ExportTarget};

use crate::errors::TensorError;
use crate::vision::VisionError;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// 采集与导出相关错误。所有错误都会中止当前操作，不做重试
#[derive(Debug, Error)]
pub enum VisualizeError {
    /// 导出到文件时未给出对象名
    #[error("导出到文件须指定非空的对象名")]
    MissingObjectName,

    /// 尚未推理就采集激活值
    #[error("第{layer_index}层（{layer_type}）尚无输出，请先执行前向推理")]
    UnevaluatedLayer {
        layer_index: usize,
        layer_type: String,
    },

    /// 没有可导出的激活值
    #[error("激活值列表为空")]
    EmptyActivations,

    #[error("读写`{path}`失败：{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Vision(#[from] VisionError),

    #[error(transparent)]
    Tensor(#[from] TensorError),
}
