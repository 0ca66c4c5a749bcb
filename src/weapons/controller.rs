//! Weapons domain: the three-slot firing state machine.

use bevy::prelude::*;

use super::definition::WeaponDefinition;
use crate::controls::ControlInput;
use crate::controls::bindings::{FIRE_1, FIRE_2, FIRE_3};

pub const SLOT_COUNT: usize = 3;
/// Slot whose shots are echoed by every weapon-mount fire point.
pub const MOUNT_SLOT: usize = 2;
/// Held axis magnitude that counts as a fire input.
pub const AXIS_FIRE_THRESHOLD: f32 = 0.5;

/// Weapon assignment per cannon slot.
pub type Loadout = [Option<WeaponDefinition>; SLOT_COUNT];

#[derive(Debug, Clone)]
pub struct CannonSlot {
    pub weapon: Option<WeaponDefinition>,
    pub binding: String,
    /// Input was active on the last tick
    pub firing: bool,
    pub fire_point: Option<Entity>,
}

/// A shot the controller decided on this tick.
#[derive(Debug, Clone)]
pub struct FireOrder {
    pub slot: usize,
    pub fire_point: Entity,
    /// Index into the mount list when the shot leaves a weapon mount
    pub mount: Option<usize>,
    /// Snapshot of the weapon at the moment of firing
    pub weapon: WeaponDefinition,
}

/// Fire point used by a slot, given the cannon's own fire points. One fire
/// point serves every slot; with two, the first two slots share the left one
/// and the third takes the right.
pub fn fire_point_for_slot(slot: usize, fire_points: &[Entity]) -> Option<Entity> {
    match fire_points.len() {
        0 => None,
        1 => Some(fire_points[0]),
        2 => Some(if slot < 2 { fire_points[0] } else { fire_points[1] }),
        _ => fire_points.get(slot).copied(),
    }
}

/// Per-tank cannon slots with independent cooldowns.
///
/// Slots only ever use cannon fire points. Weapon mounts never take over a
/// slot: whenever [`MOUNT_SLOT`] fires, each mount fires the same weapon too.
#[derive(Component, Debug, Clone)]
pub struct WeaponController {
    slots: [CannonSlot; SLOT_COUNT],
    mounts: Vec<Entity>,
}

impl WeaponController {
    pub fn new(loadout: Loadout, fire_points: &[Entity], mounts: &[Entity]) -> Self {
        let bindings = [FIRE_1, FIRE_2, FIRE_3];
        let mut weapons = loadout.into_iter();
        let slots = std::array::from_fn(|slot| CannonSlot {
            weapon: weapons.next().flatten(),
            binding: bindings[slot].to_string(),
            firing: false,
            fire_point: fire_point_for_slot(slot, fire_points),
        });
        Self {
            slots,
            mounts: mounts.to_vec(),
        }
    }

    /// Point every slot at new cannon fire points and replace the mount list
    /// after a structural rebuild.
    pub fn rewire(&mut self, fire_points: &[Entity], mounts: &[Entity]) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.fire_point = fire_point_for_slot(index, fire_points);
        }
        self.mounts = mounts.to_vec();
    }

    pub fn mounts(&self) -> &[Entity] {
        &self.mounts
    }

    pub fn slots(&self) -> &[CannonSlot] {
        &self.slots
    }

    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut CannonSlot> {
        self.slots.get_mut(slot)
    }

    /// Advance every slot by `dt` and return the shots fired, in slot order.
    pub fn tick(&mut self, dt: f32, input: &ControlInput) -> Vec<FireOrder> {
        let mut orders = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(weapon) = slot.weapon.as_mut() else {
                slot.firing = false;
                continue;
            };
            weapon.cooldown_mut().tick(dt);

            let state = input.state(&slot.binding);
            slot.firing = state.just_pressed || state.axis.abs() > AXIS_FIRE_THRESHOLD;
            if !slot.firing || !weapon.cooldown().is_ready() {
                continue;
            }
            let Some(fire_point) = slot.fire_point else {
                continue;
            };

            weapon.cooldown_mut().restart();
            orders.push(FireOrder {
                slot: index,
                fire_point,
                mount: None,
                weapon: weapon.clone(),
            });
            if index == MOUNT_SLOT {
                orders.extend(self.mounts.iter().enumerate().map(|(mount, &fire_point)| {
                    FireOrder {
                        slot: index,
                        fire_point,
                        mount: Some(mount),
                        weapon: weapon.clone(),
                    }
                }));
            }
        }

        orders
    }
}
