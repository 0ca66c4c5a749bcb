//! Controls domain: kinematic tank driving and rotor turning.

use bevy::prelude::*;

use super::ControlInput;
use super::bindings::{HORIZONTAL, ROTOR, VERTICAL};
use crate::core::forward_2d;

/// Drives the tank root it is attached to and turns the cannon rotor.
#[derive(Component, Debug, Clone)]
pub struct TankController {
    pub rotor: Option<Entity>,
    pub move_speed: f32,
    /// Degrees per second
    pub turn_speed: f32,
    /// Degrees per second
    pub rotor_speed: f32,
}

impl TankController {
    /// Steer then move along the new heading. Positive steer turns clockwise.
    pub fn drive(&self, transform: &mut Transform, throttle: f32, steer: f32, dt: f32) {
        let throttle = throttle.clamp(-1.0, 1.0);
        let steer = steer.clamp(-1.0, 1.0);

        transform.rotate_z(-steer * self.turn_speed.to_radians() * dt);
        let step = forward_2d(transform.rotation) * throttle * self.move_speed * dt;
        transform.translation += step.extend(0.0);
    }

    /// Rotate the rotor in its parent's space. Positive axis turns clockwise.
    pub fn turn_rotor(&self, transform: &mut Transform, axis: f32, dt: f32) {
        transform.rotate_z(-axis.clamp(-1.0, 1.0) * self.rotor_speed.to_radians() * dt);
    }
}

pub(crate) fn drive_tanks(
    time: Res<Time>,
    input: Res<ControlInput>,
    mut tanks: Query<(&TankController, &mut Transform)>,
    mut rotors: Query<&mut Transform, Without<TankController>>,
) {
    let dt = time.delta_secs();
    let throttle = input.axis(VERTICAL);
    let steer = input.axis(HORIZONTAL);
    let rotor_axis = input.axis(ROTOR);

    for (controller, mut transform) in &mut tanks {
        if throttle != 0.0 || steer != 0.0 {
            controller.drive(&mut transform, throttle, steer, dt);
        }

        if rotor_axis == 0.0 {
            continue;
        }
        let Some(rotor) = controller.rotor else {
            continue;
        };
        let Ok(mut rotor_transform) = rotors.get_mut(rotor) else {
            continue;
        };
        controller.turn_rotor(&mut rotor_transform, rotor_axis, dt);
    }
}
