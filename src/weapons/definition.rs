//! Weapons domain: per-cannon ammo configuration.

use avian2d::prelude::*;

use crate::assembly::FieldBinding;
use crate::content::WeaponDef;
use crate::core::layer_mask;
use crate::effects::NONE_SOUND;

pub const MIN_SPEED: f32 = 20.0;
/// Countdowns at or below this count as ready.
pub const READY_EPSILON: f32 = 1e-4;

/// Fire-rate timer. Both values are floored at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    reset: f32,
    remaining: f32,
}

impl Cooldown {
    pub fn new(reset: f32) -> Self {
        Self {
            reset: reset.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn reset_value(&self) -> f32 {
        self.reset
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= READY_EPSILON
    }

    /// Count down by `dt`. Never goes below zero.
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    /// Start a new countdown from the reset value.
    pub fn restart(&mut self) {
        self.remaining = self.reset;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDefinition {
    pub id: String,
    pub name: String,
    speed: f32,
    damage: f32,
    cooldown: Cooldown,
    pub collision_mask: LayerMask,
    pub projectile_asset: String,
    pub shot_sound: String,
    pub explosion_sound: String,
    pub muzzle_flash: Option<String>,
    pub explosion_effect: Option<String>,
}

impl WeaponDefinition {
    pub fn new(id: impl Into<String>, projectile_asset: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            speed: MIN_SPEED,
            damage: 0.0,
            cooldown: Cooldown::default(),
            collision_mask: LayerMask::ALL,
            projectile_asset: projectile_asset.into(),
            shot_sound: NONE_SOUND.to_string(),
            explosion_sound: NONE_SOUND.to_string(),
            muzzle_flash: None,
            explosion_effect: None,
        }
    }

    pub fn from_def(def: &WeaponDef) -> Self {
        let mut weapon = Self::new(def.id.clone(), def.projectile_asset.clone());
        weapon.name = def.name.clone();
        weapon.set_speed(def.speed);
        weapon.set_damage(def.damage);
        weapon.set_cooldown(def.cooldown);
        weapon.collision_mask = layer_mask(&def.collision_mask);
        weapon.shot_sound = def.shot_sound.clone();
        weapon.explosion_sound = def.explosion_sound.clone();
        weapon.muzzle_flash = def.muzzle_flash.clone();
        weapon.explosion_effect = def.explosion_effect.clone();
        weapon
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub(crate) fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }

    pub fn set_speed(&mut self, speed: f32) -> bool {
        replace(&mut self.speed, speed.max(MIN_SPEED))
    }

    pub fn set_damage(&mut self, damage: f32) -> bool {
        replace(&mut self.damage, damage.max(0.0))
    }

    /// Set the reset value of the fire-rate timer.
    pub fn set_cooldown(&mut self, seconds: f32) -> bool {
        replace(&mut self.cooldown.reset, seconds.max(0.0))
    }

    /// Set the live countdown directly.
    pub fn set_cooldown_remaining(&mut self, seconds: f32) -> bool {
        replace(&mut self.cooldown.remaining, seconds.max(0.0))
    }
}

fn replace(field: &mut f32, value: f32) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

impl FieldBinding for WeaponDefinition {
    fn field_names(&self) -> &'static [&'static str] {
        &["speed", "damage", "cooldown", "cooldown_remaining"]
    }

    fn get_field(&self, field: &str) -> Option<f32> {
        match field {
            "speed" => Some(self.speed),
            "damage" => Some(self.damage),
            "cooldown" => Some(self.cooldown.reset),
            "cooldown_remaining" => Some(self.cooldown.remaining),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: f32) -> bool {
        match field {
            "speed" => self.set_speed(value),
            "damage" => self.set_damage(value),
            "cooldown" => self.set_cooldown(value),
            "cooldown_remaining" => self.set_cooldown_remaining(value),
            _ => false,
        }
    }
}
