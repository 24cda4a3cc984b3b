/*
 * @Description  : MaxPool2d layer 单元测试
 */

use crate::nn::layer::{LayerKind, MaxPool2d, TraitLayer};
use crate::nn::NetError;
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

// 测试: 简单前向传播 (batch=1, C=1, H=4, W=4, kernel=2, stride=2)
const TEST_PYTORCH_X: &[f32] = &[
    1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
];
const TEST_PYTORCH_OUTPUT: &[f32] = &[6.0, 8.0, 14.0, 16.0];

// 测试: 多通道多批次 (batch=2, C=3, H=4, W=4)
#[rustfmt::skip]
const TEST_MULTI_X: &[f32] = &[
    1.92691529, 1.48728406, 0.90071720, -2.10552096, 0.67841840, -1.23454487, -0.04306748, -1.60466695,
    -0.75213528, 1.64872301, -0.39247864, -1.40360713, -0.72788131, -0.55943018, -0.76883888, 0.76244539,
    1.64231694, -0.15959747, -0.49739754, 0.43958926, -0.75813115, 1.07831764, 0.80080056, 1.68062055,
    1.27912438, 1.29642284, 0.61046648, 1.33473778, -0.23162432, 0.04175949, -0.25157529, 0.85985851,
    -1.38467371, -0.87123615, -0.22336592, 1.71736145, 0.31888032, -0.42451897, 0.30572093, -0.77459252,
    -1.55757248, 0.99563611, -0.87978584, -0.60114205, -1.27415121, 2.12278509, -1.23465312, -0.48791388,
    -0.91382301, -0.65813726, 0.07802387, 0.52580875, -0.48799172, 1.19136906, -0.81400764, -0.73599279,
    -1.40324783, 0.03600367, -0.06347727, 0.67561489, -0.09780689, 1.84459400, -1.18453741, 1.38354933,
    1.44513381, 0.85641253, 2.21807575, 0.52316552, 0.34664667, -0.19733144, -1.05458891, 1.27799559,
    -0.17219013, 0.52378845, 0.05662182, 0.42629614, 0.57500505, -0.64172411, -2.20639849, -0.75080305,
    0.01086814, -0.33874235, -1.34067953, -0.58537054, 0.53618813, 0.52462262, 1.14120162, 0.05164360,
    0.74395198, -0.48158440, -1.04946601, 0.60389882, -1.72229505, -0.82776886, 1.33470297, 0.48353928,
];
#[rustfmt::skip]
const TEST_MULTI_OUTPUT: &[f32] = &[
    1.92691529, 0.90071720, 1.64872301, 0.76244539,
    1.64231694, 1.68062055, 1.29642284, 1.33473778,
    0.31888032, 1.71736145, 2.12278509, -0.48791388,
    1.19136906, 0.52580875, 1.84459400, 1.38354933,
    1.44513381, 2.21807575, 0.57500505, 0.42629614,
    0.53618813, 1.14120162, 0.74395198, 1.33470297,
];

fn assert_close(actual: &Tensor, expected: &[f32]) {
    let data = actual.data_as_slice();
    assert_eq!(data.len(), expected.len());
    for (&a, &e) in data.iter().zip(expected) {
        assert_abs_diff_eq!(a, e, epsilon = 1e-5);
    }
}

#[test]
fn test_max_pool2d_forward() -> Result<(), NetError> {
    let mut pool = MaxPool2d::new((2, 2), None, (0, 0))?;
    let y = pool.forward(&Tensor::new(TEST_PYTORCH_X, &[1, 1, 4, 4]))?;
    assert_eq!(y.shape(), &[1, 1, 2, 2]);
    assert_close(&y, TEST_PYTORCH_OUTPUT);
    assert_eq!(pool.kind(), LayerKind::MaxPooling);
    Ok(())
}

#[test]
fn test_max_pool2d_multi_channel() -> Result<(), NetError> {
    let mut pool = MaxPool2d::new((2, 2), Some((2, 2)), (0, 0))?;
    let y = pool.forward(&Tensor::new(TEST_MULTI_X, &[2, 3, 4, 4]))?;
    assert_eq!(y.shape(), &[2, 3, 2, 2]);
    assert_close(&y, TEST_MULTI_OUTPUT);
    assert_eq!(pool.output_channels(3), 3);
    Ok(())
}

#[test]
fn test_max_pool2d_padding_is_negative_infinity() -> Result<(), NetError> {
    // 全负输入：若填充按0处理，结果会被0污染
    let data = (1..=9).map(|x| -(x as f32)).collect::<Vec<_>>();
    let mut pool = MaxPool2d::new((3, 3), Some((1, 1)), (1, 1))?;
    let y = pool.forward(&Tensor::new(&data, &[1, 1, 3, 3]))?;
    assert_eq!(y.shape(), &[1, 1, 3, 3]);
    assert_close(&y, &[-1., -1., -2., -1., -1., -2., -4., -4., -5.]);
    Ok(())
}

#[test]
fn test_max_pool2d_overlapping_stride() -> Result<(), NetError> {
    let data = (1..=9).map(|x| x as f32).collect::<Vec<_>>();
    let mut pool = MaxPool2d::new((3, 3), Some((2, 2)), (1, 1))?;
    // (3 + 2 - 3) / 2 + 1 = 2
    let y = pool.forward(&Tensor::new(&data, &[1, 1, 3, 3]))?;
    assert_eq!(y.shape(), &[1, 1, 2, 2]);
    assert_close(&y, &[5., 6., 8., 9.]);
    Ok(())
}

#[test]
fn test_max_pool2d_errors() {
    assert!(MaxPool2d::new((0, 2), None, (0, 0)).is_err());
    assert!(MaxPool2d::new((2, 2), Some((0, 1)), (0, 0)).is_err());
    // 填充超过窗口一半
    assert!(MaxPool2d::new((3, 3), None, (2, 2)).is_err());

    let mut pool = MaxPool2d::new((2, 2), None, (0, 0)).unwrap();
    assert!(matches!(
        pool.forward(&Tensor::zeros(&[4, 4])),
        Err(NetError::NotFourDimensional { layer: "MaxPool2d", .. })
    ));
}
