/*
 * @Description  : 分层导出各层的滤波器响应
 *
 * 文件导出的目录结构：
 *   <root>/object-<对象名>/layer-<k>/filter-<i>.png
 * 显示模式的窗口编号：k * figure_base + i；输入图像的三个颜色平面固定为窗口1、2、3。
 */

use super::figure::FigureSink;
use super::target::{DisplayTarget, ExportTarget};
use super::{LayerActivation, VisualizeError};
use crate::errors::TensorError;
use crate::tensor::Tensor;
use crate::vision::Vision;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 输出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// 渲染到编号窗口
    #[default]
    Display,
    /// 写入分层目录下的PNG文件
    FileExport,
}

/// 导出哪些层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerScope {
    /// 处理完第一层的通道后即停止
    #[default]
    FirstLayerOnly,
    AllLayers,
}

/// 一次导出实际产生的内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// 已处理的层序号
    pub layers: Vec<usize>,
    /// 写入的文件
    pub written: Vec<PathBuf>,
    /// 显示过的窗口编号（按显示顺序，含输入图像的1、2、3）
    pub figures: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Exporter {
    root: PathBuf,
    max_channels: usize,
    figure_base: usize,
    scope: LayerScope,
}

impl Exporter {
    pub const DEFAULT_MAX_CHANNELS: usize = 5;
    pub const DEFAULT_FIGURE_BASE: usize = 10;
    /// 输入图像显示的颜色平面数
    pub const INPUT_PLANES: usize = 3;

    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_channels: Self::DEFAULT_MAX_CHANNELS,
            figure_base: Self::DEFAULT_FIGURE_BASE,
            scope: LayerScope::default(),
        }
    }

    pub fn with_max_channels(mut self, max_channels: usize) -> Self {
        self.max_channels = max_channels;
        self
    }

    pub fn with_figure_base(mut self, figure_base: usize) -> Self {
        self.figure_base = figure_base;
        self
    }

    pub fn with_scope(mut self, scope: LayerScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 逐层、逐通道（每层至多`max_channels`个）渲染激活值，然后总是把输入图像的
    /// 颜色平面显示到窗口1、2、3。
    ///
    /// - `FileExport`模式下`object_name`必须非空，否则返回`MissingObjectName`且不写入任何文件；
    /// - 主循环出错时，输入图像仍会被显示，之后返回主循环的错误；
    /// - 已创建的目录不会回滚。
    pub fn export<S: FigureSink + ?Sized>(
        &self,
        activations: &[LayerActivation],
        input: &Tensor,
        mode: OutputMode,
        object_name: Option<&str>,
        sink: &mut S,
    ) -> Result<ExportReport, VisualizeError> {
        let mut report = ExportReport::default();
        let exported = self.export_layers(activations, mode, object_name, sink, &mut report);
        if let Err(e) = &exported {
            warn!("导出滤波器响应失败：{e}");
        }
        let shown = self.show_input_planes(input, sink, &mut report);
        exported?;
        shown?;
        Ok(report)
    }

    fn export_layers<S: FigureSink + ?Sized>(
        &self,
        activations: &[LayerActivation],
        mode: OutputMode,
        object_name: Option<&str>,
        sink: &mut S,
        report: &mut ExportReport,
    ) -> Result<(), VisualizeError> {
        let object_name = match mode {
            OutputMode::FileExport => Some(
                object_name
                    .filter(|name| !name.trim().is_empty())
                    .ok_or(VisualizeError::MissingObjectName)?,
            ),
            OutputMode::Display => None,
        };
        if activations.is_empty() {
            return Err(VisualizeError::EmptyActivations);
        }

        for activation in activations {
            let count = activation.channels().min(self.max_channels);
            info!(
                "第{}层（{}）：渲染{}/{}个通道",
                activation.layer_index,
                activation.layer_type,
                count,
                activation.channels()
            );
            for channel_index in 1..=count {
                let slice = activation.tensor.channel(0, channel_index - 1)?;
                let image = Vision::heatmap(&slice)?;
                match object_name {
                    Some(object_name) => {
                        let target = ExportTarget {
                            object_name,
                            layer_index: activation.layer_index,
                            channel_index,
                        };
                        let dir = target.layer_dir(&self.root);
                        std::fs::create_dir_all(&dir)
                            .map_err(|source| VisualizeError::Io { path: dir, source })?;
                        let path = target.path(&self.root);
                        Vision::save_image(&image, &path)?;
                        debug!("已写入{}", path.display());
                        report.written.push(path);
                    }
                    None => {
                        let figure = DisplayTarget {
                            layer_index: activation.layer_index,
                            channel_index,
                        }
                        .figure(self.figure_base);
                        let title = format!(
                            "layer-{} filter-{} ({})",
                            activation.layer_index, channel_index, activation.layer_type
                        );
                        sink.show(figure, &title, &image)?;
                        report.figures.push(figure);
                    }
                }
            }
            report.layers.push(activation.layer_index);

            if self.scope == LayerScope::FirstLayerOnly {
                break;
            }
        }
        Ok(())
    }

    /// 把输入`[1, C, H, W]`的前3个颜色平面显示到窗口1、2、3
    fn show_input_planes<S: FigureSink + ?Sized>(
        &self,
        input: &Tensor,
        sink: &mut S,
        report: &mut ExportReport,
    ) -> Result<(), VisualizeError> {
        let channels = input.channels().ok_or(TensorError::DimensionMismatch {
            expected: 4,
            got: input.dimension(),
        })?;
        for plane in 1..=channels.min(Self::INPUT_PLANES) {
            let image = Vision::luma(&input.channel(0, plane - 1)?)?;
            sink.show(plane, &format!("input channel {plane}"), &image)?;
            report.figures.push(plane);
        }
        Ok(())
    }
}
