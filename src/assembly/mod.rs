//! Assembly domain: tank part hierarchy, categories, accessories and the builder.

mod accessory;
mod binding;
mod builder;
mod category;
mod errors;
mod library;
mod parts;
mod requests;
mod sync;


pub use accessory::{
    ACCESSORY_Z_BASE, Accessory, AccessoryBounds, AccessoryEdit, AccessoryKind, AccessoryRef,
    MAX_ROTATION, ORDER_Z_STEP,
};
pub use binding::FieldBinding;
pub use builder::{BASE_FOLDER, CANNON_FOLDER, HULL_FOLDER, MOUNT_FIRE_POINT_OFFSET, TankBuilder};
pub use category::{
    Category, Containers, RESERVED_CATEGORY_NAMES, default_slot_for, validate_category_name,
};
pub use errors::BuilderError;
pub use library::SpriteLibrary;
pub use parts::{
    CannonMount, CannonParts, CannonType, FIRE_POINT_PIVOT_FACTOR, FirePoint, HullClass,
    HullParts, ParentSlot, PartCollider, TankAssembly,
};
pub use requests::{BuildOp, BuildRequest, BuilderSession, apply_op, resolve_loadout};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::load_content;

pub struct AssemblyPlugin;

impl Plugin for AssemblyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteLibrary>()
            .init_resource::<BuilderSession>()
            .add_message::<BuildRequest>()
            .add_systems(Startup, library::load_sprite_library.after(load_content))
            .add_systems(
                Update,
                (
                    requests::apply_build_commands,
                    sync::sync_accessory_nodes,
                    sync::attach_part_colliders,
                )
                    .chain(),
            );
    }
}

/// Spawn an empty tank root. Build it by sending [`BuildRequest`]s.
pub fn spawn_tank(
    commands: &mut Commands,
    name: &str,
    position: Vec2,
    hull_class: HullClass,
) -> Entity {
    commands
        .spawn((
            Name::new(name.to_string()),
            TankAssembly::new(hull_class),
            Transform::from_translation(position.extend(0.0)),
            Visibility::default(),
            RigidBody::Kinematic,
        ))
        .id()
}
