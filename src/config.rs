/*
 * @Description  : 运行参数。默认值即编译期常量，可用JSON文件（如`inception-viz.json`）覆盖其中任意字段
 */

use crate::visualize::{Exporter, LayerScope, OutputMode};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "inception-viz.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件`{path}`失败：{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件`{path}`失败：{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// 输入图像
    pub image_path: PathBuf,
    /// 预训练网络（`use_pretrained`为真时使用）
    pub model_path: PathBuf,
    pub use_pretrained: bool,
    /// 图像中物体的名称，文件导出模式下必须非空
    pub object_name: Option<String>,
    pub export_root: PathBuf,
    pub mode: OutputMode,
    /// 每层至多导出的通道数
    pub max_channels: usize,
    /// 显示模式的窗口编号基数
    pub figure_base: usize,
    pub layer_scope: LayerScope,
    /// 显示模式下窗口图像的落盘目录
    pub preview_dir: PathBuf,
    /// 未使用预训练网络时，随机初始化权重的种子
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("images/1.png"),
            model_path: PathBuf::from("model-nets/model--float.net"),
            use_pretrained: false,
            object_name: Some("cup".to_string()),
            export_root: PathBuf::from("filter-responses"),
            mode: OutputMode::FileExport,
            max_channels: Exporter::DEFAULT_MAX_CHANNELS,
            figure_base: Exporter::DEFAULT_FIGURE_BASE,
            layer_scope: LayerScope::FirstLayerOnly,
            preview_dir: PathBuf::from("figures"),
            seed: 42,
        }
    }
}

impl RunConfig {
    /// 读取JSON配置，缺省的字段取默认值
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 文件不存在时返回默认配置；文件存在但无法解析仍视为错误
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("未找到{}，使用默认配置", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        info!("已载入配置{}", path.display());
        Ok(config)
    }

    /// 按配置构造导出器
    pub fn exporter(&self) -> Exporter {
        Exporter::new(&self.export_root)
            .with_max_channels(self.max_channels)
            .with_figure_base(self.figure_base)
            .with_scope(self.layer_scope)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
