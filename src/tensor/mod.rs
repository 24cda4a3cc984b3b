use ndarray::{Array, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

mod index;
mod property;
mod shape;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 本库中卷积相关的张量一律采用`[batch, channels, height, width]`的布局。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]...
    /// 若为更高维度的数组，`shape`可以是[b,c,h,w,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let expected: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            expected,
            "数据长度{}与形状{:?}不符",
            data.len(),
            shape
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap();
        Self { data }
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间
    pub fn new_random(min: f32, max: f32, shape: &[usize]) -> Self {
        Self::new_random_with_rng(min, max, shape, &mut rand::thread_rng())
    }

    /// 同`new_random`，但使用固定种子，确保可重复性
    pub fn new_random_with_seed(min: f32, max: f32, shape: &[usize], seed: u64) -> Self {
        Self::new_random_with_rng(min, max, shape, &mut StdRng::seed_from_u64(seed))
    }

    pub(crate) fn new_random_with_rng<R: Rng>(
        min: f32,
        max: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let uniform = Uniform::from(min..=max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 创建一个服从正态分布的随机张量（Box-Muller变换）
    pub fn new_normal(mean: f32, std_dev: f32, shape: &[usize]) -> Self {
        Self::new_normal_with_rng(mean, std_dev, shape, &mut rand::thread_rng())
    }

    /// 同`new_normal`，但使用固定种子
    pub fn new_normal_with_seed(mean: f32, std_dev: f32, shape: &[usize], seed: u64) -> Self {
        Self::new_normal_with_rng(mean, std_dev, shape, &mut StdRng::seed_from_u64(seed))
    }

    pub(crate) fn new_normal_with_rng<R: Rng>(
        mean: f32,
        std_dev: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.r#gen();
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }
}
