//! Projectile domain: ammo state and per-tick integration.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::forward_2d;
use crate::weapons::WeaponDefinition;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectileState {
    #[default]
    Active,
    /// Terminal
    Exploded,
}

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Travelling,
    /// The probe found this entity; the projectile is now Exploded
    Hit(Entity),
    /// Already Exploded, nothing moved
    Spent,
}

/// Kinematic ammo spawned from a weapon definition.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub damage: f32,
    pub speed: f32,
    pub mask: LayerMask,
    pub explosion_sound: String,
    pub explosion_effect: Option<String>,
    pub state: ProjectileState,
}

impl Projectile {
    pub fn from_weapon(weapon: &WeaponDefinition) -> Self {
        Self {
            damage: weapon.damage(),
            speed: weapon.speed(),
            mask: weapon.collision_mask,
            explosion_sound: weapon.explosion_sound.clone(),
            explosion_effect: weapon.explosion_effect.clone(),
            state: ProjectileState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    /// Move forward along local +Y by `speed * dt` and probe the swept path.
    /// `probe` gets the position before the move and the heading, and returns
    /// the entity hit. Its reach must cover at least `speed * dt`; see
    /// [`ProjectileTuning::probe_length`].
    pub fn step(
        &mut self,
        transform: &mut Transform,
        dt: f32,
        probe: impl FnOnce(Vec2, Dir2) -> Option<Entity>,
    ) -> StepOutcome {
        if !self.is_active() {
            return StepOutcome::Spent;
        }

        let origin = transform.translation.truncate();
        let forward = forward_2d(transform.rotation);
        transform.translation += (forward * self.speed * dt).extend(0.0);

        let Ok(direction) = Dir2::new(forward) else {
            return StepOutcome::Travelling;
        };
        match probe(origin, direction) {
            Some(target) => {
                self.state = ProjectileState::Exploded;
                StepOutcome::Hit(target)
            }
            None => StepOutcome::Travelling,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ProjectileTuning {
    /// Look-ahead past the projectile's new position
    pub probe_range: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self { probe_range: 6.0 }
    }
}

impl ProjectileTuning {
    /// Ray length for one tick: the distance travelled plus the look-ahead,
    /// so fast shots never skip a collider between ticks.
    pub fn probe_length(&self, speed: f32, dt: f32) -> f32 {
        speed * dt + self.probe_range
    }
}

/// Reaction key looked up in [`super::TagReactions`] when a projectile hits.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TargetTag(pub String);

#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage. Returns true once health is depleted.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount.max(0.0)).max(0.0);
        self.current <= 0.0
    }
}
