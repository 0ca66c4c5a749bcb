//! Controls domain: binding-based input, tank driving and camera follow.

mod camera;
mod input;
mod tank;


pub use camera::{CameraFollow, follow_step};
pub use input::{ControlInput, ControlState, InputBindings, KeyBinding};
pub use tank::TankController;

use bevy::prelude::*;

use crate::core::SimSet;

/// Binding ids used by the default loadout and tank controller.
pub mod bindings {
    pub const FIRE_1: &str = "Fire1";
    pub const FIRE_2: &str = "Fire2";
    pub const FIRE_3: &str = "Fire3";
    pub const VERTICAL: &str = "Vertical";
    pub const HORIZONTAL: &str = "Horizontal";
    pub const ROTOR: &str = "Rotor";
}

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlInput>()
            .init_resource::<InputBindings>()
            .add_systems(Update, (input::read_control_input, camera::follow_camera))
            .add_systems(FixedUpdate, tank::drive_tanks.in_set(SimSet::Drive))
            .add_systems(FixedPostUpdate, input::clear_control_edges);
    }
}
