use super::small_network;
use crate::nn::TraitLayer;
use crate::tensor::Tensor;
use crate::visualize::{VisualizeError, capture_activations};

#[test]
fn test_capture_after_forward() {
    let mut network = small_network().unwrap();
    network
        .forward(&Tensor::new_random_with_seed(0., 1., &[1, 3, 6, 6], 1))
        .unwrap();

    let activations = capture_activations(&network).unwrap();
    assert_eq!(activations.len(), network.len());
    for (i, (activation, layer)) in activations.iter().zip(network.layers()).enumerate() {
        assert_eq!(activation.layer_index, i + 1);
        assert_eq!(activation.layer_type, layer.kind().tag());
        assert_eq!(Some(&activation.tensor), layer.output());
    }
    assert_eq!(activations[0].layer_type, "nn.SpatialConvolution");
    assert_eq!(activations[2].tensor.shape(), &[1, 7, 3, 3]);
    assert_eq!(activations[0].channels(), 7);
}

#[test]
fn test_capture_is_independent_of_later_forward() {
    let mut network = small_network().unwrap();
    network
        .forward(&Tensor::new_random_with_seed(0., 1., &[1, 3, 6, 6], 1))
        .unwrap();
    let first = capture_activations(&network).unwrap();
    let snapshot = first.clone();

    network
        .forward(&Tensor::new_random_with_seed(0., 1., &[1, 3, 6, 6], 2))
        .unwrap();
    let second = capture_activations(&network).unwrap();

    assert_eq!(first, snapshot);
    assert_ne!(first[0].tensor, second[0].tensor);
}

#[test]
fn test_capture_on_unevaluated_network() {
    let network = small_network().unwrap();
    match capture_activations(&network) {
        Err(VisualizeError::UnevaluatedLayer {
            layer_index,
            layer_type,
        }) => {
            assert_eq!(layer_index, 1);
            assert_eq!(layer_type, "nn.SpatialConvolution");
        }
        other => panic!("应返回UnevaluatedLayer，实际为{other:?}"),
    }
}

#[test]
fn test_capture_after_clear_outputs() {
    let mut network = small_network().unwrap();
    network.forward(&Tensor::zeros(&[1, 3, 4, 4])).unwrap();
    network.clear_outputs();
    assert!(matches!(
        capture_activations(&network),
        Err(VisualizeError::UnevaluatedLayer { layer_index: 1, .. })
    ));
}

#[test]
fn test_capture_after_failed_forward() {
    let mut network = small_network().unwrap();
    network
        .forward(&Tensor::new_random_with_seed(0., 1., &[1, 3, 6, 6], 1))
        .unwrap();
    // 1×1的特征图无法做2×2池化
    assert!(network.forward(&Tensor::zeros(&[1, 3, 1, 1])).is_err());

    let err = capture_activations(&network).unwrap_err();
    assert!(matches!(
        err,
        VisualizeError::UnevaluatedLayer {
            layer_index: 3,
            ref layer_type,
        } if layer_type == "nn.SpatialMaxPooling"
    ));
}
