use crate::tensor::Tensor;
use image::{DynamicImage, GenericImageView};

pub trait TraitForDynamicImage {
    fn to_tensor(&self) -> Tensor;
}

impl TraitForDynamicImage for DynamicImage {
    /// 将Image库的`DynamicImage`格式转换为`[H, W, 3]`张量。
    /// 灰度图会被复制到3个通道，透明通道被丢弃。
    fn to_tensor(&self) -> Tensor {
        let (width, height) = self.dimensions();
        let rgb = self.to_rgb8();
        let (width, height) = (width as usize, height as usize);
        let mut tensor = Tensor::zeros(&[height, width, 3]);

        for (x, y, pixel) in rgb.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                tensor[[y, x, c]] = f32::from(pixel[c]);
            }
        }
        tensor
    }
}
