/*
 * @Description  : 演示用网络：GoogLeNet 前端 + 两个 Inception 模块
 */

use super::layer::{Conv2d, Dropout, Inception, InceptionConfig, MaxPool2d, ReLU};
use super::{NetError, Network};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 第一个 Inception 模块：192 → 64 + 128 + 32 + 32 = 256
pub const INCEPTION_3A: InceptionConfig = InceptionConfig {
    input_channels: 192,
    reductions: [64, 96, 16, 32],
    expansions: [128, 32],
    output_channels: 256,
};

/// 第二个 Inception 模块：256 → 128 + 192 + 96 + 64 = 480
pub const INCEPTION_3B: InceptionConfig = InceptionConfig {
    input_channels: 256,
    reductions: [128, 128, 32, 64],
    expansions: [192, 96],
    output_channels: 480,
};

/// 构建演示网络，输入为`[1, 3, H, W]`的RGB图像。参数由`seed`决定，可重复。
///
/// ```text
/// conv 7×7/2 (3→64) → ReLU → maxpool 3×3/2
/// → conv 1×1 (64→64) → ReLU → conv 3×3 (64→192) → ReLU → maxpool 3×3/2
/// → Inception(3a) → Inception(3b) → maxpool 3×3/2 → dropout(0.4)
/// ```
pub fn demo_network(seed: u64) -> Result<Network, NetError> {
    let rng = &mut StdRng::seed_from_u64(seed);
    let mut network = Network::new("inception-demo");
    network
        .add(Conv2d::new_with_rng(3, 64, (7, 7), (2, 2), (3, 3), rng)?)
        .add(ReLU::new())
        .add(MaxPool2d::new((3, 3), Some((2, 2)), (1, 1))?)
        .add(Conv2d::new_with_rng(64, 64, (1, 1), (1, 1), (0, 0), rng)?)
        .add(ReLU::new())
        .add(Conv2d::new_with_rng(64, 192, (3, 3), (1, 1), (1, 1), rng)?)
        .add(ReLU::new())
        .add(MaxPool2d::new((3, 3), Some((2, 2)), (1, 1))?)
        .add(Inception::new_with_rng(INCEPTION_3A, rng)?)
        .add(Inception::new_with_rng(INCEPTION_3B, rng)?)
        .add(MaxPool2d::new((3, 3), Some((2, 2)), (1, 1))?)
        .add(Dropout::new(0.4)?);
    Ok(network)
}
