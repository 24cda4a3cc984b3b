use crate::tensor::Tensor;
use crate::vision::{TraitForDynamicImage, Vision, VisionError};
use approx::assert_abs_diff_eq;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓保存、载入↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_save_load_color_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.png");

    let mut image = RgbImage::new(3, 2);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(2, 1, Rgb([10, 20, 30]));
    Vision::save_image(&image, &path).unwrap();

    let tensor = Vision::load_image(&path).unwrap();
    assert_eq!(tensor.shape(), &[2, 3, 3]);
    assert_eq!(tensor[[0, 0, 0]], 255.);
    assert_eq!(tensor[[0, 0, 1]], 0.);
    assert_eq!(tensor[[1, 2, 2]], 30.);

    // 覆盖写入不报错
    Vision::save_image(&image, &path).unwrap();
}

#[test]
fn test_load_image_as_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.png");

    let mut image = RgbImage::new(4, 2);
    image.put_pixel(3, 1, Rgb([255, 51, 0]));
    Vision::save_image(&image, &path).unwrap();

    let batch = Vision::load_image_as_batch(&path).unwrap();
    assert_eq!(batch.shape(), &[1, 3, 2, 4]);
    assert_abs_diff_eq!(batch[[0, 0, 1, 3]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(batch[[0, 1, 1, 3]], 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(batch[[0, 2, 1, 3]], 0.0, epsilon = 1e-6);
}

#[test]
fn test_load_missing_image() {
    let result = Vision::load_image("./no/such/image.png");
    assert!(matches!(result, Err(VisionError::Image(_))));
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑保存、载入↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

#[test]
fn test_luma_image_to_tensor_is_rgb() {
    let mut luma = GrayImage::new(2, 2);
    luma.put_pixel(1, 0, Luma([77]));
    let tensor = DynamicImage::ImageLuma8(luma).to_tensor();
    assert_eq!(tensor.shape(), &[2, 2, 3]);
    for c in 0..3 {
        assert_eq!(tensor[[0, 1, c]], 77.);
    }
}

#[test]
fn test_hwc_to_batch_rejects_wrong_rank() {
    let tensor = Tensor::zeros(&[2, 2]);
    assert!(matches!(
        Vision::hwc_to_batch(&tensor),
        Err(VisionError::NotAnImage(_))
    ));
}
