/*
 * @Description  : MaxPool2d (2D 最大池化) 层
 *
 * - 输入格式：[batch_size, channels, H, W]
 * - 输出格式：[batch_size, channels, H', W']
 * - 填充区域视为 -inf，因此不会被选为最大值
 *
 * 等价于 Torch 的 nn.SpatialMaxPooling（floor 模式）
 */

use super::{LayerKind, TraitLayer, expect_4d, output_size};
use crate::nn::NetError;
use crate::tensor::Tensor;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// `MaxPool2d` 层，无可学习参数
///
/// # 输出尺寸计算
/// ```text
/// H' = (H + 2*pad_h - kernel_h) / stride_h + 1
/// W' = (W + 2*pad_w - kernel_w) / stride_w + 1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxPool2d {
    kernel_size: (usize, usize),
    stride: (usize, usize),
    padding: (usize, usize),
    #[serde(skip)]
    output: Option<Tensor>,
}

impl MaxPool2d {
    /// # 参数
    /// - `kernel_size`: 池化窗口大小 (kH, kW)
    /// - `stride`: 步长 (sH, sW)，若为 None 则默认等于 `kernel_size`
    /// - `padding`: 填充 (pH, pW)，须不大于窗口的一半
    pub fn new(
        kernel_size: (usize, usize),
        stride: Option<(usize, usize)>,
        padding: (usize, usize),
    ) -> Result<Self, NetError> {
        let stride = stride.unwrap_or(kernel_size);
        if kernel_size.0 == 0 || kernel_size.1 == 0 || stride.0 == 0 || stride.1 == 0 {
            return Err(NetError::InvalidOperation(format!(
                "MaxPool2d 的窗口与步长须大于0：kernel={kernel_size:?}, stride={stride:?}"
            )));
        }
        if padding.0 * 2 > kernel_size.0 || padding.1 * 2 > kernel_size.1 {
            return Err(NetError::InvalidOperation(format!(
                "MaxPool2d 的填充{padding:?}不能超过窗口{kernel_size:?}的一半"
            )));
        }
        Ok(Self {
            kernel_size,
            stride,
            padding,
            output: None,
        })
    }

    pub const fn kernel_size(&self) -> (usize, usize) {
        self.kernel_size
    }

    pub const fn stride(&self) -> (usize, usize) {
        self.stride
    }

    pub const fn padding(&self) -> (usize, usize) {
        self.padding
    }

    fn pool(&self, input: &Tensor) -> Result<Tensor, NetError> {
        let (batch_size, channels, in_h, in_w) = expect_4d("MaxPool2d", input)?;
        let (k_h, k_w) = self.kernel_size;
        let (s_h, s_w) = self.stride;
        let (p_h, p_w) = self.padding;
        let out_h = output_size("MaxPool2d", in_h, k_h, s_h, p_h)?;
        let out_w = output_size("MaxPool2d", in_w, k_w, s_w, p_w)?;

        let x = input.data_as_slice();
        let planes: Vec<Vec<f32>> = (0..batch_size * channels)
            .into_par_iter()
            .map(|plane| {
                let base = plane * in_h * in_w;
                let mut out = vec![f32::NEG_INFINITY; out_h * out_w];
                for oh in 0..out_h {
                    for ow in 0..out_w {
                        let mut max_val = f32::NEG_INFINITY;
                        for kh in 0..k_h {
                            let ih = (oh * s_h + kh) as isize - p_h as isize;
                            if ih < 0 || ih >= in_h as isize {
                                continue;
                            }
                            for kw in 0..k_w {
                                let iw = (ow * s_w + kw) as isize - p_w as isize;
                                if iw < 0 || iw >= in_w as isize {
                                    continue;
                                }
                                max_val = max_val.max(x[base + ih as usize * in_w + iw as usize]);
                            }
                        }
                        out[oh * out_w + ow] = max_val;
                    }
                }
                out
            })
            .collect();

        let data = planes.into_iter().flatten().collect::<Vec<_>>();
        Ok(Tensor::new(&data, &[batch_size, channels, out_h, out_w]))
    }
}

impl TraitLayer for MaxPool2d {
    fn kind(&self) -> LayerKind {
        LayerKind::MaxPooling
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        let output = self.pool(input)?;
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
