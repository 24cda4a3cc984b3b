use super::VisionError;
use crate::tensor::Tensor;
use image::{Rgb, RgbImage};

// 蓝 → 青 → 黄 → 红
const PALETTE: [[f32; 3]; 4] = [
    [0., 0., 255.],
    [0., 255., 255.],
    [255., 255., 0.],
    [255., 0., 0.],
];

/// 将[0,1]内的强度映射为热力图颜色，区间外的值会被截断
pub fn heat_color(intensity: f32) -> Rgb<u8> {
    let t = if intensity.is_nan() {
        0.
    } else {
        intensity.clamp(0., 1.)
    };
    let segments = (PALETTE.len() - 1) as f32;
    let scaled = t * segments;
    let lower = (scaled.floor() as usize).min(PALETTE.len() - 2);
    let frac = scaled - lower as f32;
    let (from, to) = (PALETTE[lower], PALETTE[lower + 1]);
    let mut rgb = [0u8; 3];
    for c in 0..3 {
        rgb[c] = (from[c] + (to[c] - from[c]) * frac).round() as u8;
    }
    Rgb(rgb)
}

pub(super) fn render(slice: &Tensor) -> Result<RgbImage, VisionError> {
    render_with(slice, heat_color)
}

/// 灰度渲染，三个分量相同
pub(super) fn render_luma(slice: &Tensor) -> Result<RgbImage, VisionError> {
    render_with(slice, |t| {
        let v = (t.clamp(0., 1.) * 255.).round() as u8;
        Rgb([v, v, v])
    })
}

fn render_with(slice: &Tensor, color: impl Fn(f32) -> Rgb<u8>) -> Result<RgbImage, VisionError> {
    if slice.dimension() != 2 {
        return Err(VisionError::NotAnImage(format!(
            "只能渲染形状为[H, W]的张量，实际为{:?}",
            slice.shape()
        )));
    }
    let (height, width) = (slice.shape()[0], slice.shape()[1]);
    let (min, max) = match (slice.min(), slice.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(VisionError::NotAnImage("空张量无法渲染".to_string())),
    };
    // 常数切片统一映射到0
    let range = if max > min { max - min } else { 1. };

    let mut image = RgbImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let intensity = (slice[[y, x]] - min) / range;
            image.put_pixel(x as u32, y as u32, color(intensity));
        }
    }
    Ok(image)
}
