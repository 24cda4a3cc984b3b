/*
 * @Description  : 本模块提供图像的载入、保存以及特征图的热力图渲染。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像是指RGB格式的图像（灰度、带透明通道的图像载入时一律转成RGB）；
 *                 2. 图像张量有两种布局：`[H, W, C]`（像素值0~255，便于和图像库互转）
 *                    与`[1, C, H, W]`（像素值0~1，作为网络输入）。
 */

mod convert;
mod heatmap;

#[cfg(test)]
mod tests;

pub use convert::TraitForDynamicImage;
pub use heatmap::heat_color;

use crate::errors::TensorError;
use crate::tensor::Tensor;
use image::RgbImage;
use std::path::Path;
use thiserror::Error;

/// 图像处理相关错误
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("张量不是合法的图像：{0}")]
    NotAnImage(String),
    #[error("图像库错误：{0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

pub struct Vision;

impl Vision {
    /// 将本地的图像加载为`[H, W, 3]`的张量，像素值在[0,255]之间
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Tensor, VisionError> {
        let image = image::open(path)?;
        Ok(image.to_tensor())
    }

    /// 将本地的图像加载为单样本批次`[1, 3, H, W]`，像素值缩放到[0,1]
    pub fn load_image_as_batch<P: AsRef<Path>>(path: P) -> Result<Tensor, VisionError> {
        let hwc = Self::load_image(path)?;
        Self::hwc_to_batch(&hwc)
    }

    /// `[H, W, C]`（0~255）→ `[1, C, H, W]`（0~1）
    pub fn hwc_to_batch(hwc: &Tensor) -> Result<Tensor, VisionError> {
        if hwc.dimension() != 3 {
            return Err(VisionError::NotAnImage(format!(
                "期望形状为[H, W, C]，实际为{:?}",
                hwc.shape()
            )));
        }
        let (height, width, channels) = (hwc.shape()[0], hwc.shape()[1], hwc.shape()[2]);
        let mut batch = Tensor::zeros(&[1, channels, height, width]);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    batch[[0, c, y, x]] = hwc[[y, x, c]] / 255.;
                }
            }
        }
        Ok(batch)
    }

    /// 将2维张量`[H, W]`按自身最小、最大值归一化后渲染为热力图
    pub fn heatmap(slice: &Tensor) -> Result<RgbImage, VisionError> {
        heatmap::render(slice)
    }

    /// 同`heatmap`，但渲染为灰度图（用于显示输入图像的单个颜色平面）
    pub fn luma(slice: &Tensor) -> Result<RgbImage, VisionError> {
        heatmap::render_luma(slice)
    }

    /// 保存图像到本地（格式由扩展名决定），已存在的文件会被覆盖
    pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<(), VisionError> {
        image.save(path)?;
        Ok(())
    }
}
