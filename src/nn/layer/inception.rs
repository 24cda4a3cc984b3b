/*
 * @Description  : Inception 模块 —— 四个并行分支，输出沿通道维拼接
 *
 * 分支结构（每个卷积后接 ReLU）：
 * 1. 1×1 卷积                         → reductions[0]
 * 2. 1×1 卷积 → reductions[1]，3×3 卷积 → expansions[0]
 * 3. 1×1 卷积 → reductions[2]，5×5 卷积 → expansions[1]
 * 4. 3×3 最大池化（步长1，填充1），1×1 卷积 → reductions[3]
 *
 * 输出通道数 = reductions[0] + expansions[0] + expansions[1] + reductions[3]
 */

use super::{Conv2d, Layer, LayerKind, MaxPool2d, ReLU, TraitLayer, expect_4d};
use crate::nn::NetError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Inception 模块的通道配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InceptionConfig {
    pub input_channels: usize,
    /// 各分支中1×1卷积的输出通道数
    pub reductions: [usize; 4],
    /// 3×3、5×5卷积的输出通道数
    pub expansions: [usize; 2],
    /// 声明的输出通道数
    pub output_channels: usize,
}

impl InceptionConfig {
    /// 各分支实际输出通道数之和
    pub const fn computed_output_channels(&self) -> usize {
        self.reductions[0] + self.expansions[0] + self.expansions[1] + self.reductions[3]
    }

    /// 声明的输出通道数须等于各分支之和，否则不构建任何模块
    pub fn validate(&self) -> Result<(), NetError> {
        let computed = self.computed_output_channels();
        if computed != self.output_channels {
            return Err(NetError::ChannelMismatch {
                expected: self.output_channels,
                computed,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inception {
    config: InceptionConfig,
    branches: Vec<Vec<Layer>>,
    #[serde(skip)]
    output: Option<Tensor>,
}

impl Inception {
    pub fn new(config: InceptionConfig) -> Result<Self, NetError> {
        Self::new_with_rng(config, &mut rand::thread_rng())
    }

    pub fn new_seeded(config: InceptionConfig, seed: u64) -> Result<Self, NetError> {
        Self::new_with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    pub(in crate::nn) fn new_with_rng<R: Rng>(
        config: InceptionConfig,
        rng: &mut R,
    ) -> Result<Self, NetError> {
        config.validate()?;

        let InceptionConfig {
            input_channels: c,
            reductions: [r1, r2, r3, r4],
            expansions: [e1, e2],
            ..
        } = config;

        let mut conv = |inp: usize, out: usize, k: usize| -> Result<Layer, NetError> {
            Ok(Conv2d::new_with_rng(inp, out, (k, k), (1, 1), (k / 2, k / 2), &mut *rng)?.into())
        };

        let branches = vec![
            vec![conv(c, r1, 1)?, ReLU::new().into()],
            vec![
                conv(c, r2, 1)?,
                ReLU::new().into(),
                conv(r2, e1, 3)?,
                ReLU::new().into(),
            ],
            vec![
                conv(c, r3, 1)?,
                ReLU::new().into(),
                conv(r3, e2, 5)?,
                ReLU::new().into(),
            ],
            vec![
                MaxPool2d::new((3, 3), Some((1, 1)), (1, 1))?.into(),
                conv(c, r4, 1)?,
                ReLU::new().into(),
            ],
        ];

        Ok(Self {
            config,
            branches,
            output: None,
        })
    }

    pub const fn config(&self) -> &InceptionConfig {
        &self.config
    }

    pub fn branches(&self) -> &[Vec<Layer>] {
        &self.branches
    }
}

impl TraitLayer for Inception {
    fn kind(&self) -> LayerKind {
        LayerKind::Concatenation
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, NetError> {
        let (_, channels, _, _) = expect_4d("Inception", input)?;
        if channels != self.config.input_channels {
            return Err(NetError::ShapeMismatch {
                layer: "Inception",
                expected: vec![self.config.input_channels],
                got: vec![channels],
            });
        }

        let mut outputs = Vec::with_capacity(self.branches.len());
        for branch in &mut self.branches {
            let mut x = input.clone();
            for layer in branch.iter_mut() {
                x = layer.forward(&x)?;
            }
            outputs.push(x);
        }
        let output = Tensor::concat(&outputs.iter().collect::<Vec<_>>(), 1)?;
        self.output = Some(output.clone());
        Ok(output)
    }

    fn output(&self) -> Option<&Tensor> {
        self.output.as_ref()
    }

    fn clear_output(&mut self) {
        self.output = None;
        for layer in self.branches.iter_mut().flatten() {
            layer.clear_output();
        }
    }

    fn output_channels(&self, _input_channels: usize) -> usize {
        self.config.output_channels
    }
}
