/*
 * @Description  : 顺序网络（Sequential Network）
 *
 * - 按顺序依次调用各层，每层保留其最近一次的输出（前向推理器）
 * - 支持剔除不兼容层、生成摘要，以及整网的保存/载入（bincode）
 */

use super::descriptor::{LayerDescriptor, NetworkDescriptor};
use super::layer::{Layer, LayerKind, TraitLayer};
use super::NetError;
use crate::tensor::Tensor;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    name: String,
    layers: Vec<Layer>,
}

impl Network {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: Vec::new(),
        }
    }

    /// 在末尾追加一层
    pub fn add(&mut self, layer: impl Into<Layer>) -> &mut Self {
        self.layers.push(layer.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// 前向推理：依次执行每一层并返回最后一层的输出。
    ///
    /// 推理前先清空各层保留的输出，中途失败时其后各层保持无输出，
    /// 不会残留上一次推理的结果。
    pub fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        if self.layers.is_empty() {
            return Err(NetError::EmptyNetwork);
        }
        self.clear_outputs();
        let mut x = input.clone();
        for (i, layer) in self.layers.iter_mut().enumerate() {
            x = layer.forward(&x)?;
            debug!("第{}层（{}）输出形状：{:?}", i + 1, layer.kind(), x.shape());
        }
        Ok(x)
    }

    /// 清空所有层保留的输出
    pub fn clear_outputs(&mut self) {
        for layer in &mut self.layers {
            layer.clear_output();
        }
    }

    /// 给定输入通道数时整个网络的输出通道数
    pub fn output_channels(&self, input_channels: usize) -> usize {
        self.layers
            .iter()
            .fold(input_channels, |c, layer| layer.output_channels(c))
    }

    /// 生成网络摘要
    pub fn describe(&self) -> NetworkDescriptor {
        let mut descriptor = NetworkDescriptor::new(&self.name);
        for (i, layer) in self.layers.iter().enumerate() {
            descriptor.add_layer(LayerDescriptor {
                index: i + 1,
                tag: layer.kind().tag().to_string(),
                layer_type: layer.into(),
                output_shape: layer.output().map(|t| t.shape().to_vec()),
            });
        }
        descriptor
    }

    /// 将网络摘要以JSON写入本地
    pub fn save_summary<P: AsRef<Path>>(&self, path: P) -> Result<(), NetError> {
        let path = path.as_ref();
        let json = self
            .describe()
            .to_json()
            .map_err(|e| NetError::Codec(format!("序列化网络摘要失败: {e}")))?;
        std::fs::write(path, json).map_err(|source| NetError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 保存完整网络（结构+参数，不含各层的输出）
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NetError> {
        let path = path.as_ref();
        let bytes = bincode::serialize(self)
            .map_err(|e| NetError::Codec(format!("序列化网络失败: {e}")))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| NetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, bytes).map_err(|source| NetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("网络`{}`已保存至{}", self.name, path.display());
        Ok(())
    }

    /// 载入`save`保存的网络
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| NetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let network: Self = bincode::deserialize(&bytes)
            .map_err(|e| NetError::Codec(format!("解析`{}`失败: {e}", path.display())))?;
        info!(
            "已从{}载入网络`{}`（共{}层）",
            path.display(),
            network.name,
            network.len()
        );
        Ok(network)
    }

    /// 载入预训练网络并剔除批大小为1时无法使用的层
    pub fn load_for_inference<P: AsRef<Path>>(path: P) -> Result<Self, NetError> {
        Ok(strip_incompatible_layers(&Self::load(path)?))
    }
}

/// 返回剔除了所有批归一化层的新网络，原网络不变。
/// 本库只以单样本批次推理，批归一化层在此场景下不适用。
pub fn strip_incompatible_layers(network: &Network) -> Network {
    let layers = network
        .layers
        .iter()
        .filter(|layer| layer.kind() != LayerKind::BatchNormalization)
        .cloned()
        .collect::<Vec<_>>();
    let removed = network.len() - layers.len();
    if removed > 0 {
        info!("已剔除{removed}个批归一化层");
    }
    Network {
        name: network.name.clone(),
        layers,
    }
}
