/*
 * @Description  : 网络保存/载入与摘要导出测试
 */

use crate::nn::layer::{BatchNorm2d, Conv2d, LayerKind, ReLU, TraitLayer};
use crate::nn::{NetError, Network, NetworkDescriptor};
use crate::tensor::Tensor;
use std::fs;

fn network_with_batch_norm() -> Result<Network, NetError> {
    let mut network = Network::new("with-bn");
    network
        .add(Conv2d::new_seeded(3, 2, (3, 3), (1, 1), (1, 1), 11)?)
        .add(BatchNorm2d::from_statistics(
            vec![0.1, -0.2],
            vec![2., 0.5],
            vec![1.5, 1.],
            vec![0., 0.3],
            1e-5,
        )?)
        .add(ReLU::new());
    Ok(network)
}

#[test]
fn test_save_load_network() -> Result<(), NetError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model-nets").join("model--float.net");

    let mut network = network_with_batch_norm()?;
    let x = Tensor::new_random_with_seed(0., 1., &[1, 3, 4, 4], 5);
    let expected = network.forward(&x)?;
    network.save(&path)?;

    let mut loaded = Network::load(&path)?;
    assert_eq!(loaded.name(), "with-bn");
    assert_eq!(loaded.len(), 3);
    // 各层输出不随模型保存
    assert!(loaded.layers().iter().all(|l| l.output().is_none()));
    assert_eq!(loaded.forward(&x)?, expected);
    Ok(())
}

#[test]
fn test_load_for_inference_strips_batch_norm() -> Result<(), NetError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.net");
    network_with_batch_norm()?.save(&path)?;

    let loaded = Network::load_for_inference(&path)?;
    assert_eq!(loaded.len(), 2);
    assert!(
        loaded
            .layers()
            .iter()
            .all(|l| l.kind() != LayerKind::BatchNormalization)
    );
    Ok(())
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.net");
    assert!(matches!(Network::load(&missing), Err(NetError::Io { .. })));

    let invalid = dir.path().join("invalid.net");
    fs::write(&invalid, b"INVALID_DATA").unwrap();
    assert!(matches!(Network::load(&invalid), Err(NetError::Codec(_))));
}

#[test]
fn test_save_summary() -> Result<(), NetError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let mut network = network_with_batch_norm()?;
    network.forward(&Tensor::zeros(&[1, 3, 2, 2]))?;
    network.save_summary(&path)?;

    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("nn.SpatialBatchNormalization"));
    let descriptor = NetworkDescriptor::from_json(&json).unwrap();
    assert_eq!(descriptor, network.describe());
    Ok(())
}
