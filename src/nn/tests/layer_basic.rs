/*
 * @Description  : ReLU、Dropout、BatchNorm2d 单元测试
 */

use crate::nn::layer::{BatchNorm2d, Dropout, LayerKind, ReLU, TraitLayer};
use crate::nn::NetError;
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_relu() -> Result<(), NetError> {
    let mut relu = ReLU::new();
    let y = relu.forward(&Tensor::new(&[-1., 0., 2., -3.], &[1, 1, 2, 2]))?;
    assert_eq!(y, Tensor::new(&[0., 0., 2., 0.], &[1, 1, 2, 2]));
    assert_eq!(relu.kind(), LayerKind::Activation);
    assert_eq!(relu.kind().tag(), "nn.ReLU");
    Ok(())
}

#[test]
fn test_dropout_is_identity_at_inference() -> Result<(), NetError> {
    let mut dropout = Dropout::new(0.4)?;
    let x = Tensor::new_random_with_seed(-1., 1., &[1, 2, 3, 3], 3);
    assert_eq!(dropout.forward(&x)?, x);
    assert_eq!(dropout.output(), Some(&x));
    assert_eq!(dropout.kind(), LayerKind::Dropout);

    assert!(Dropout::new(1.).is_err());
    assert!(Dropout::new(-0.1).is_err());
    Ok(())
}

#[test]
fn test_batch_norm() -> Result<(), NetError> {
    // 通道0：(x - 1) / 2 * 2 + 0.5 = x - 0.5；通道1：恒等
    let mut bn =
        BatchNorm2d::from_statistics(vec![1., 0.], vec![4., 1.], vec![2., 1.], vec![0.5, 0.], 0.)?;
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6., 7., 8.], &[1, 2, 2, 2]);
    let y = bn.forward(&x)?;
    let expected = [0.5, 1.5, 2.5, 3.5, 5., 6., 7., 8.];
    for (a, e) in y.data_as_slice().iter().zip(expected) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-6);
    }
    assert_eq!(bn.kind(), LayerKind::BatchNormalization);

    assert!(matches!(
        bn.forward(&Tensor::zeros(&[1, 3, 2, 2])),
        Err(NetError::ShapeMismatch { layer: "BatchNorm2d", .. })
    ));
    assert!(BatchNorm2d::from_statistics(vec![0.], vec![1., 1.], vec![1.], vec![0.], 1e-5).is_err());
    Ok(())
}

#[test]
fn test_batch_norm_default_is_near_identity() -> Result<(), NetError> {
    let mut bn = BatchNorm2d::new(3);
    let x = Tensor::new_random_with_seed(-1., 1., &[1, 3, 2, 2], 9);
    let y = bn.forward(&x)?;
    for (a, e) in y.data_as_slice().iter().zip(x.data_as_slice()) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-4);
    }
    Ok(())
}
