//! Assembly domain: push accessory attributes and part colliders into the ECS.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::library::SpriteLibrary;
use super::parts::{PartCollider, TankAssembly};
use crate::core::GameLayer;

/// Write dirty accessories to their nodes. Nodes not spawned yet stay dirty
/// and are retried next frame.
pub(crate) fn sync_accessory_nodes(
    mut tanks: Query<&mut TankAssembly>,
    library: Res<SpriteLibrary>,
    mut nodes: Query<(&mut Name, &mut Transform, &mut Sprite)>,
) {
    for mut assembly in &mut tanks {
        let accessories = assembly
            .bypass_change_detection()
            .categories
            .iter_mut()
            .flat_map(|category| category.accessories.iter_mut());

        for accessory in accessories {
            if !accessory.is_dirty() {
                continue;
            }
            let Ok((mut name, mut transform, mut sprite)) = nodes.get_mut(accessory.node) else {
                continue;
            };
            accessory.take_dirty();

            *name = Name::new(accessory.name().to_string());
            *transform = accessory.transform();
            sprite.image = library.variant(accessory.folder(), accessory.style());
            sprite.color = accessory.color();
        }
    }
}

pub(crate) fn attach_part_colliders(
    mut commands: Commands,
    parts: Query<(Entity, &PartCollider), Added<PartCollider>>,
) {
    for (entity, part) in &parts {
        commands.entity(entity).insert((
            Collider::rectangle(part.size.x, part.size.y),
            CollisionLayers::new(GameLayer::Tank, [GameLayer::Target, GameLayer::Obstacle]),
        ));
    }
}
