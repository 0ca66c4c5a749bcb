//! Core domain: fixed timestep, physics layers and shared math helpers.

mod layers;

pub use layers::{GameLayer, layer_mask};

use bevy::prelude::*;

/// Simulation rate for firing, projectile travel and collision.
pub const SIMULATION_HZ: f64 = 60.0;

/// Ordering of the fixed-tick simulation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Tank driving and rotor turning
    Drive,
    /// Cooldowns and projectile spawning
    Fire,
    /// Projectile travel, probing and explosions
    Travel,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(
                FixedUpdate,
                (SimSet::Drive, SimSet::Fire, SimSet::Travel).chain(),
            );
    }
}

/// In-plane rotation (radians around Z) of a 2D rotation quaternion.
/// Any out-of-plane tilt is dropped so effects always lie flat.
pub fn flat_angle(rotation: Quat) -> f32 {
    let (z, _, _) = rotation.to_euler(EulerRot::ZYX);
    z
}

/// Local +Y of a rotation, which is the forward axis for every part and projectile.
pub fn forward_2d(rotation: Quat) -> Vec2 {
    (rotation * Vec3::Y).truncate()
}
