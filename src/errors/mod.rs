use thiserror::Error;

/// 张量相关的错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致：{first:?}与{other:?}仅允许在第{axis}维上不同")]
    InconsistentShape {
        axis: usize,
        first: Vec<usize>,
        other: Vec<usize>,
    },
    #[error("张量维数不符：期望{expected}维，实际{got}维")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("索引越界：第{axis}维的索引{index}须小于{len}")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        len: usize,
    },
}
