use super::Tensor;
use crate::errors::TensorError;
use ndarray::{Axis, concatenate};

impl Tensor {
    /// 改变张量形状（元素总数须不变，否则panic）
    pub fn reshape(&self, shape: &[usize]) -> Self {
        assert_eq!(
            self.size(),
            shape.iter().product::<usize>(),
            "无法将形状{:?}变换为{:?}",
            self.shape(),
            shape
        );
        Self::new(&self.data_as_slice(), shape)
    }

    /// 取出4维张量`[b, c, h, w]`中第`batch`个样本、第`channel`个通道（均从0开始）的2维切片`[h, w]`。
    /// 返回的是一份独立拷贝，而非原张量的视图。
    pub fn channel(&self, batch: usize, channel: usize) -> Result<Self, TensorError> {
        if self.dimension() != 4 {
            return Err(TensorError::DimensionMismatch {
                expected: 4,
                got: self.dimension(),
            });
        }
        for (axis, index) in [(0, batch), (1, channel)] {
            let len = self.shape()[axis];
            if index >= len {
                return Err(TensorError::IndexOutOfRange { axis, index, len });
            }
        }
        let slice = self
            .data
            .index_axis(Axis(0), batch)
            .index_axis(Axis(0), channel)
            .to_owned();
        Ok(Self { data: slice })
    }

    /// 通道数，即4维张量的第二个维度；非4维张量返回None
    pub fn channels(&self) -> Option<usize> {
        (self.dimension() == 4).then(|| self.shape()[1])
    }

    /// 沿`axis`维拼接多个张量。除`axis`外，其余维度须完全一致。
    pub fn concat(tensors: &[&Self], axis: usize) -> Result<Self, TensorError> {
        let first = tensors.first().ok_or(TensorError::EmptyList)?;
        if axis >= first.dimension() {
            return Err(TensorError::DimensionMismatch {
                expected: axis + 1,
                got: first.dimension(),
            });
        }
        for t in tensors.iter().skip(1) {
            let compatible = t.dimension() == first.dimension()
                && t.shape()
                    .iter()
                    .zip(first.shape())
                    .enumerate()
                    .all(|(i, (a, b))| i == axis || a == b);
            if !compatible {
                return Err(TensorError::InconsistentShape {
                    axis,
                    first: first.shape().to_vec(),
                    other: t.shape().to_vec(),
                });
            }
        }

        let views = tensors.iter().map(|t| t.data.view()).collect::<Vec<_>>();
        // 形状已在上面逐一校验
        let data = concatenate(Axis(axis), &views).map_err(|_| TensorError::InconsistentShape {
            axis,
            first: first.shape().to_vec(),
            other: vec![],
        })?;
        Ok(Self { data })
    }
}
