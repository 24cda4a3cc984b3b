/*
 * @Description  : 负责神经网络（neural network）的构建与推理
 */

mod demo;
mod descriptor;
mod error;
pub mod layer;
mod network;

pub use demo::{INCEPTION_3A, INCEPTION_3B, demo_network};
pub use descriptor::{LayerDescriptor, LayerTypeDescriptor, NetworkDescriptor};
pub use error::NetError;
pub use layer::{Layer, LayerKind, TraitLayer};
pub use network::{Network, strip_incompatible_layers};

#[cfg(test)]
mod tests;
