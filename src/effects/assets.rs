//! Effects domain: prefab-backed asset registry and timed despawn.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::content::{ContentRegistry, PrefabDef, rgba, vec2};
use crate::projectile::{Projectile, ProjectileState};

/// Spawns registered visual assets by id.
pub trait AssetRegistry: Send + Sync + 'static {
    /// Spawn `asset_id` at a world position with a Z rotation in radians.
    /// Unregistered ids log a warning and return `None`.
    fn spawn(
        &self,
        commands: &mut Commands,
        asset_id: &str,
        position: Vec2,
        rotation: f32,
    ) -> Option<Entity>;

    fn contains(&self, asset_id: &str) -> bool;
}

/// Counts down and despawns the entity when it reaches zero.
#[derive(Component, Debug, Clone, Copy)]
pub struct Lifetime(pub f32);

/// A resolved prefab: everything needed to spawn it without further lookups.
#[derive(Debug, Clone)]
pub struct Prefab {
    pub name: String,
    pub image: Handle<Image>,
    pub color: Color,
    pub size: Vec2,
    pub z: f32,
    pub lifetime: Option<f32>,
}

impl Prefab {
    pub fn from_def(def: &PrefabDef, asset_server: &AssetServer) -> Self {
        Self {
            name: def.name.clone(),
            image: def
                .image
                .as_ref()
                .map(|path| asset_server.load(path.clone()))
                .unwrap_or_default(),
            color: rgba(def.color),
            size: vec2(def.size),
            z: def.z,
            lifetime: def.lifetime,
        }
    }
}

/// Default [`AssetRegistry`] spawning sprite prefabs defined in prefabs.ron.
#[derive(Debug, Default)]
pub struct PrefabRegistry {
    prefabs: HashMap<String, Prefab>,
}

impl PrefabRegistry {
    pub fn from_content(registry: &ContentRegistry, asset_server: &AssetServer) -> Self {
        let prefabs = registry
            .prefabs
            .iter()
            .map(|(id, def)| (id.clone(), Prefab::from_def(def, asset_server)))
            .collect();
        Self { prefabs }
    }

    pub fn insert(&mut self, id: impl Into<String>, prefab: Prefab) {
        self.prefabs.insert(id.into(), prefab);
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }
}

impl AssetRegistry for PrefabRegistry {
    fn spawn(
        &self,
        commands: &mut Commands,
        asset_id: &str,
        position: Vec2,
        rotation: f32,
    ) -> Option<Entity> {
        let Some(prefab) = self.prefabs.get(asset_id) else {
            warn!("Asset '{}' is not registered", asset_id);
            return None;
        };

        let mut entity = commands.spawn((
            Name::new(prefab.name.clone()),
            Sprite {
                image: prefab.image.clone(),
                color: prefab.color,
                custom_size: Some(prefab.size),
                ..default()
            },
            Transform::from_translation(position.extend(prefab.z))
                .with_rotation(Quat::from_rotation_z(rotation)),
        ));

        if let Some(seconds) = prefab.lifetime {
            entity.insert(Lifetime(seconds));
        }

        Some(entity.id())
    }

    fn contains(&self, asset_id: &str) -> bool {
        self.prefabs.contains_key(asset_id)
    }
}

/// Tick every [`Lifetime`] and despawn what ran out. A projectile that expires
/// this way ends in `Exploded` without any explosion effects.
pub(crate) fn expire_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime, Option<&mut Projectile>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut lifetime, projectile) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 > 0.0 {
            continue;
        }

        if let Some(mut projectile) = projectile {
            projectile.state = ProjectileState::Exploded;
        }
        // A projectile hit in the same tick queues its own despawn too
        commands.entity(entity).try_despawn();
    }
}
