//! Weapons domain: messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A cannon slot spawned a projectile.
#[derive(Debug, Clone)]
pub struct ShotFired {
    pub tank: Entity,
    pub slot: usize,
    pub projectile: Entity,
}

impl Message for ShotFired {}
