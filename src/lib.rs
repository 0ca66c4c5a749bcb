//! Tank Forge: a 2D tank builder with cannon slots, projectiles and reactive targets.

pub mod assembly;
pub mod content;
pub mod controls;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod effects;
pub mod projectile;
pub mod range;
pub mod weapons;

use bevy::prelude::*;

/// Every gameplay plugin. Hosts add `DefaultPlugins` and avian's `PhysicsPlugins` first.
pub struct TankForgePlugin;

impl Plugin for TankForgePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            effects::EffectsPlugin,
            controls::ControlsPlugin,
            assembly::AssemblyPlugin,
            weapons::WeaponsPlugin,
            projectile::ProjectilePlugin,
            range::RangePlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
