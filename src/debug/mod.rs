//! Debug domain: gizmo overlay and builder hotkeys for fast iteration.
//!
//! Hotkeys:
//! - F2 toggles the overlay (fire points, projectile probes)
//! - F3 switches every tank between single and double cannon
//! - F4 erases every tank

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::assembly::{BuildOp, BuildRequest, FirePoint, TankAssembly};
use crate::core::forward_2d;
use crate::projectile::{Projectile, ProjectileTuning};

// ============================================================================
// Debug State Resource
// ============================================================================

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub overlay: bool,
}

// ============================================================================
// Plugin
// ============================================================================

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, handle_debug_hotkeys)
            .add_systems(
                Update,
                (draw_fire_points, draw_projectile_probes)
                    .run_if(|state: Res<DebugState>| state.overlay),
            );
    }
}

// ============================================================================
// Systems
// ============================================================================

fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugState>,
    tanks: Query<(Entity, &TankAssembly)>,
    mut requests: MessageWriter<BuildRequest>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        state.overlay = !state.overlay;
        info!("Debug overlay: {}", state.overlay);
    }

    if keyboard.just_pressed(KeyCode::F3) {
        for (tank, assembly) in &tanks {
            let Some(cannon) = assembly.cannon.as_ref() else {
                continue;
            };
            requests.write(BuildRequest::new(
                tank,
                BuildOp::SpawnCannon(cannon.cannon_type.toggled()),
            ));
        }
    }

    if keyboard.just_pressed(KeyCode::F4) {
        for (tank, _) in &tanks {
            requests.write(BuildRequest::new(tank, BuildOp::EraseAll));
        }
    }
}

fn draw_fire_points(mut gizmos: Gizmos, fire_points: Query<&GlobalTransform, With<FirePoint>>) {
    for transform in &fire_points {
        let position = transform.translation().truncate();
        let aim = forward_2d(transform.rotation());
        gizmos.circle_2d(position, 3.0, Color::srgb(1.0, 0.8, 0.1));
        gizmos.line_2d(position, position + aim * 12.0, Color::srgb(1.0, 0.8, 0.1));
    }
}

fn draw_projectile_probes(
    mut gizmos: Gizmos,
    tuning: Res<ProjectileTuning>,
    projectiles: Query<(&Projectile, &Transform)>,
) {
    for (projectile, transform) in &projectiles {
        if !projectile.is_active() {
            continue;
        }
        let origin = transform.translation.truncate();
        let end = origin + forward_2d(transform.rotation) * tuning.probe_range;
        gizmos.line_2d(origin, end, Color::srgb(1.0, 0.2, 0.2));
    }
}
