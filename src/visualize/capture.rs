use super::VisualizeError;
use crate::nn::{Network, TraitLayer};
use crate::tensor::Tensor;

/// 某一层在一次前向推理中的输出快照
#[derive(Debug, Clone, PartialEq)]
pub struct LayerActivation {
    /// 层序号，从1开始，即推理顺序
    pub layer_index: usize,
    /// 产生该输出的层的类型标签
    pub layer_type: String,
    /// 输出张量`[1, C, H, W]`的独立拷贝
    pub tensor: Tensor,
}

impl LayerActivation {
    /// 通道数（第二个维度）；非4维张量视为0个通道
    pub fn channels(&self) -> usize {
        self.tensor.channels().unwrap_or(0)
    }
}

/// 按推理顺序逐层采集输出，不跳过、不重排任何层。
///
/// 只要有一层尚无输出，就返回`UnevaluatedLayer`且不返回任何记录。
pub fn capture_activations(network: &Network) -> Result<Vec<LayerActivation>, VisualizeError> {
    network
        .layers()
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let layer_type = layer.kind().tag().to_string();
            match layer.output() {
                Some(output) => Ok(LayerActivation {
                    layer_index: i + 1,
                    layer_type,
                    tensor: output.clone(),
                }),
                None => Err(VisualizeError::UnevaluatedLayer {
                    layer_index: i + 1,
                    layer_type,
                }),
            }
        })
        .collect()
}
