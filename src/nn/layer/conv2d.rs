/*
 * @Description  : Conv2d (2D 卷积) 层
 *
 * 输入/输出形状：
 * - 输入：[batch_size, in_channels, H, W]
 * - 输出：[batch_size, out_channels, H', W']
 *
 * 输出尺寸计算：
 * H' = (H + 2*padding_h - kernel_h) / stride_h + 1
 * W' = (W + 2*padding_w - kernel_w) / stride_w + 1
 *
 * 计算：output = conv2d(x, K) + b，填充为零填充
 */

use super::{LayerKind, TraitLayer, expect_4d, output_size};
use crate::nn::NetError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Conv2d (2D 卷积) 层
///
/// # 使用示例
/// ```ignore
/// let mut conv = Conv2d::new(3, 64, (7, 7), (2, 2), (3, 3))?;
/// let y = conv.forward(&x)?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conv2d {
    /// 卷积核参数 [out_channels, in_channels, kernel_h, kernel_w]
    kernel: Tensor,
    /// 偏置参数 [out_channels]
    bias: Tensor,
    stride: (usize, usize),
    padding: (usize, usize),
    #[serde(skip)]
    output: Option<Tensor>,
}

impl Conv2d {
    /// 创建新的 Conv2d 层，参数随机初始化
    ///
    /// # 参数
    /// - `in_channels`: 输入通道数
    /// - `out_channels`: 输出通道数
    /// - `kernel_size`: 卷积核大小 (kH, kW)
    /// - `stride`: 步长 (sH, sW)
    /// - `padding`: 填充 (pH, pW)
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, NetError> {
        Self::new_with_rng(
            in_channels,
            out_channels,
            kernel_size,
            stride,
            padding,
            &mut rand::thread_rng(),
        )
    }

    /// 创建新的 Conv2d 层（带种子，确保可重复性）
    pub fn new_seeded(
        in_channels: usize,
        out_channels: usize,
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
        seed: u64,
    ) -> Result<Self, NetError> {
        Self::new_with_rng(
            in_channels,
            out_channels,
            kernel_size,
            stride,
            padding,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    /// 与Torch的`SpatialConvolution:reset()`一致：权重、偏置均服从 U(-1/√fan_in, 1/√fan_in)
    pub(in crate::nn) fn new_with_rng<R: Rng>(
        in_channels: usize,
        out_channels: usize,
        kernel_size: (usize, usize),
        stride: (usize, usize),
        padding: (usize, usize),
        rng: &mut R,
    ) -> Result<Self, NetError> {
        let (k_h, k_w) = kernel_size;
        if in_channels == 0 || out_channels == 0 || k_h == 0 || k_w == 0 {
            return Err(NetError::InvalidOperation(format!(
                "Conv2d 的通道数与卷积核大小须大于0：in={in_channels}, out={out_channels}, kernel={kernel_size:?}"
            )));
        }
        let bound = 1. / ((in_channels * k_h * k_w) as f32).sqrt();
        let kernel =
            Tensor::new_random_with_rng(-bound, bound, &[out_channels, in_channels, k_h, k_w], rng);
        let bias = Tensor::new_random_with_rng(-bound, bound, &[out_channels], rng);
        Self::from_parameters(kernel, bias, stride, padding)
    }

    /// 用已有参数创建 Conv2d 层（如载入预训练权重）
    ///
    /// - `kernel`: [`C_out`, `C_in`, kH, kW]
    /// - `bias`: [`C_out`]
    pub fn from_parameters(
        kernel: Tensor,
        bias: Tensor,
        stride: (usize, usize),
        padding: (usize, usize),
    ) -> Result<Self, NetError> {
        let kernel_shape = kernel.shape();
        if kernel_shape.len() != 4 {
            return Err(NetError::NotFourDimensional {
                layer: "Conv2d",
                got: kernel_shape.to_vec(),
            });
        }
        if bias.shape() != [kernel_shape[0]] {
            return Err(NetError::ShapeMismatch {
                layer: "Conv2d",
                expected: vec![kernel_shape[0]],
                got: bias.shape().to_vec(),
            });
        }
        if stride.0 == 0 || stride.1 == 0 {
            return Err(NetError::InvalidOperation(format!(
                "Conv2d 的步长须大于0，得到{stride:?}"
            )));
        }
        Ok(Self {
            kernel,
            bias,
            stride,
            padding,
            output: None,
        })
    }

    pub fn in_channels(&self) -> usize {
        self.kernel.shape()[1]
    }

    pub fn out_channels(&self) -> usize {
        self.kernel.shape()[0]
    }

    pub fn kernel_size(&self) -> (usize, usize) {
        (self.kernel.shape()[2], self.kernel.shape()[3])
    }

    pub const fn stride(&self) -> (usize, usize) {
        self.stride
    }

    pub const fn padding(&self) -> (usize, usize) {
        self.padding
    }

    pub const fn kernel(&self) -> &Tensor {
        &self.kernel
    }

    pub const fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// 执行卷积运算（Rayon 在 batch×输出通道 上并行）
    fn convolve(&self, input: &Tensor) -> Result<Tensor, NetError> {
        let (batch_size, in_c, in_h, in_w) = expect_4d("Conv2d", input)?;
        if in_c != self.in_channels() {
            return Err(NetError::ShapeMismatch {
                layer: "Conv2d",
                expected: vec![self.in_channels()],
                got: vec![in_c],
            });
        }

        let out_c = self.out_channels();
        let (k_h, k_w) = self.kernel_size();
        let (stride_h, stride_w) = self.stride;
        let (pad_h, pad_w) = self.padding;
        let out_h = output_size("Conv2d", in_h, k_h, stride_h, pad_h)?;
        let out_w = output_size("Conv2d", in_w, k_w, stride_w, pad_w)?;

        let x = input.data_as_slice();
        let k = self.kernel.data_as_slice();
        let b = self.bias.data_as_slice();

        let planes: Vec<Vec<f32>> = (0..batch_size * out_c)
            .into_par_iter()
            .map(|plane| {
                let (bi, oc) = (plane / out_c, plane % out_c);
                let mut out = vec![b[oc]; out_h * out_w];
                for oh in 0..out_h {
                    for ow in 0..out_w {
                        let mut sum = 0.0f32;
                        for ic in 0..in_c {
                            let x_base = (bi * in_c + ic) * in_h * in_w;
                            let k_base = (oc * in_c + ic) * k_h * k_w;
                            for kh in 0..k_h {
                                // 落在零填充区域内的位置直接跳过
                                let ih = (oh * stride_h + kh) as isize - pad_h as isize;
                                if ih < 0 || ih >= in_h as isize {
                                    continue;
                                }
                                for kw in 0..k_w {
                                    let iw = (ow * stride_w + kw) as isize - pad_w as isize;
                                    if iw < 0 || iw >= in_w as isize {
                                        continue;
                                    }
                                    sum += x[x_base + ih as usize * in_w + iw as usize]
                                        * k[k_base + kh * k_w + kw];
                                }
                            }
                        }
                        out[oh * out_w + ow] += sum;
                    }
                }
                out
            })
            .collect();

        let data = planes.into_iter().flatten().collect::<Vec<_>>();
        Ok(Tensor::new(&data, &[batch_size, out_c, out_h, out_w]))
    }
}

impl TraitLayer for Conv2d {
    fn kind(&self) -> LayerKind {
        LayerKind::Convolution
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        let output = self.convolve(input)?;
        self.output = Some(output.clone());
        Ok(output)
    }

    fn output(&self) -> Option<&Tensor> {
        self.output.as_ref()
    }

    fn clear_output(&mut self) {
        self.output = None;
    }

    fn output_channels(&self, _input_channels: usize) -> usize {
        self.out_channels()
    }
}
