//! Controls domain: smoothed camera tracking.

use bevy::prelude::*;

/// Pulls the camera toward `target` each frame.
#[derive(Component, Debug, Clone)]
pub struct CameraFollow {
    pub target: Entity,
    /// Higher is snappier; 0 never moves
    pub stiffness: f32,
}

/// Exponential approach toward `target`. Keeps the camera's z.
pub fn follow_step(current: Vec3, target: Vec2, stiffness: f32, dt: f32) -> Vec3 {
    let t = 1.0 - (-stiffness.max(0.0) * dt).exp();
    current.truncate().lerp(target, t).extend(current.z)
}

pub(crate) fn follow_camera(
    time: Res<Time>,
    mut cameras: Query<(&CameraFollow, &mut Transform)>,
    targets: Query<&GlobalTransform>,
) {
    let dt = time.delta_secs();

    for (follow, mut transform) in &mut cameras {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };
        transform.translation = follow_step(
            transform.translation,
            target.translation().truncate(),
            follow.stiffness,
            dt,
        );
    }
}
