//! Core domain: physics layers for collision filtering.

use avian2d::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Hull and cannon colliders of any tank
    Tank,
    /// Destructible or reactive targets (mines, crates)
    Target,
    /// Static blockers
    Obstacle,
}

/// Combine a list of layers into a single query mask.
pub fn layer_mask(layers: &[GameLayer]) -> LayerMask {
    LayerMask(layers.iter().fold(0, |bits, layer| bits | layer.to_bits()))
}
