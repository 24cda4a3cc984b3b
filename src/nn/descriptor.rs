/*
 * @Description  : 网络描述符（Network Descriptor）
 *                 可读的网络摘要，用于日志、调试输出与JSON导出
 */

use super::layer::{Layer, LayerKind};
use serde::{Deserialize, Serialize};

/// 网络的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// 格式版本（用于向后兼容）
    pub version: String,
    /// 网络名称
    pub name: String,
    pub layers: Vec<LayerDescriptor>,
}

/// 单个层的描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// 层序号（从1开始，即推理顺序）
    pub index: usize,
    /// 类型标签，如`nn.SpatialConvolution`
    pub tag: String,
    pub layer_type: LayerTypeDescriptor,
    /// 最近一次推理的输出形状；尚未推理则不输出
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_shape: Option<Vec<usize>>,
}

/// 层类型描述（包含类型特定参数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerTypeDescriptor {
    Conv2d {
        in_channels: usize,
        out_channels: usize,
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    },
    MaxPool2d {
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    },
    ReLU,
    Dropout {
        p: f32,
    },
    BatchNorm2d {
        channels: usize,
    },
    Inception {
        input_channels: usize,
        reductions: [usize; 4],
        expansions: [usize; 2],
        output_channels: usize,
    },
}

impl From<&Layer> for LayerTypeDescriptor {
    fn from(layer: &Layer) -> Self {
        match layer {
            Layer::Conv2d(conv) => Self::Conv2d {
                in_channels: conv.in_channels(),
                out_channels: conv.out_channels(),
                kernel_size: conv.kernel_size(),
                stride: conv.stride(),
                padding: conv.padding(),
            },
            Layer::MaxPool2d(pool) => Self::MaxPool2d {
                kernel_size: pool.kernel_size(),
                stride: pool.stride(),
                padding: pool.padding(),
            },
            Layer::ReLU(_) => Self::ReLU,
            Layer::Dropout(dropout) => Self::Dropout { p: dropout.p() },
            Layer::BatchNorm2d(bn) => Self::BatchNorm2d {
                channels: bn.channels(),
            },
            Layer::Inception(inception) => {
                let config = inception.config();
                Self::Inception {
                    input_channels: config.input_channels,
                    reductions: config.reductions,
                    expansions: config.expansions,
                    output_channels: config.output_channels,
                }
            }
        }
    }
}

impl NetworkDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            layers: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, layer: LayerDescriptor) {
        self.layers.push(layer);
    }

    /// 统计某一种类的层的个数
    pub fn count(&self, kind: LayerKind) -> usize {
        self.layers.iter().filter(|l| l.tag == kind.tag()).count()
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
