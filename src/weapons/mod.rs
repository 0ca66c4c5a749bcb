//! Weapons domain: weapon definitions, cannon slots and firing.

mod controller;
mod definition;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use controller::{
    AXIS_FIRE_THRESHOLD, CannonSlot, FireOrder, Loadout, MOUNT_SLOT, SLOT_COUNT, WeaponController,
    fire_point_for_slot,
};
pub use definition::{Cooldown, MIN_SPEED, READY_EPSILON, WeaponDefinition};
pub use events::ShotFired;

use bevy::prelude::*;

use crate::core::SimSet;

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ShotFired>()
            .add_systems(FixedUpdate, systems::fire_weapons.in_set(SimSet::Fire));
    }
}
