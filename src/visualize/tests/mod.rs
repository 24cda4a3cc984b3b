mod capture;
mod target;

use crate::nn::layer::{Conv2d, MaxPool2d, ReLU};
use crate::nn::{NetError, Network};

/// 3层小网络：conv(3→7) → ReLU → maxpool
fn small_network() -> Result<Network, NetError> {
    let mut network = Network::new("small");
    network
        .add(Conv2d::new_seeded(3, 7, (3, 3), (1, 1), (1, 1), 3)?)
        .add(ReLU::new())
        .add(MaxPool2d::new((2, 2), None, (0, 0))?);
    Ok(network)
}
