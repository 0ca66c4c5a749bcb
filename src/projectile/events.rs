//! Projectile domain: messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A projectile's probe hit `target` and the projectile exploded.
#[derive(Debug, Clone)]
pub struct ProjectileExploded {
    pub projectile: Entity,
    pub target: Entity,
    pub position: Vec2,
    pub damage: f32,
}

impl Message for ProjectileExploded {}
