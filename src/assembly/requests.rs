//! Assembly domain: build requests and the session that applies them.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use super::accessory::{AccessoryEdit, AccessoryRef};
use super::builder::TankBuilder;
use super::errors::BuilderError;
use super::library::SpriteLibrary;
use super::parts::{CannonType, HullClass, ParentSlot, TankAssembly};
use crate::content::{ContentRegistry, TankDefaults};
use crate::weapons::{Loadout, WeaponDefinition};

/// One builder operation against the tank at `tank`.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub tank: Entity,
    pub op: BuildOp,
}

impl Message for BuildRequest {}

impl BuildRequest {
    pub fn new(tank: Entity, op: BuildOp) -> Self {
        Self { tank, op }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOp {
    SpawnHull,
    SpawnCannon(CannonType),
    SetHullClass(HullClass),
    AddCategory { name: String, folder: String },
    RemoveCategory(usize),
    SpawnAccessory(usize),
    CopyAccessory { target: usize, source: AccessoryRef },
    MakeWeaponMount(AccessoryRef),
    SetAccessorySlot { accessory: AccessoryRef, slot: ParentSlot },
    EditAccessory { accessory: AccessoryRef, edit: AccessoryEdit },
    AddMovementSystem,
    /// Weapon ids per cannon slot
    AddWeaponSystem { loadout: [Option<String>; 3] },
    AddCameraSystem,
    EraseAll,
}

/// Halts on a missing `TankAssembly`; a halted session refuses every request
/// until the host resumes it.
#[derive(Resource, Debug, Default)]
pub struct BuilderSession {
    halted: Option<BuilderError>,
}

impl BuilderSession {
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn halt_reason(&self) -> Option<&BuilderError> {
        self.halted.as_ref()
    }

    pub fn halt(&mut self, reason: BuilderError) {
        self.halted = Some(reason);
    }

    pub fn resume(&mut self) {
        self.halted = None;
    }
}

/// Look up weapon ids in content. Empty slots stay empty.
pub fn resolve_loadout(
    ids: &[Option<String>; 3],
    registry: &ContentRegistry,
) -> Result<Loadout, BuilderError> {
    let mut loadout = Loadout::default();
    for (slot, id) in ids.iter().enumerate() {
        let Some(id) = id else {
            continue;
        };
        let def = registry
            .weapons
            .get(id)
            .ok_or_else(|| BuilderError::UnknownWeapon(id.clone()))?;
        loadout[slot] = Some(WeaponDefinition::from_def(def));
    }
    Ok(loadout)
}

/// Run one operation through the builder.
pub fn apply_op(
    builder: &mut TankBuilder,
    op: BuildOp,
    registry: &ContentRegistry,
) -> Result<(), BuilderError> {
    match op {
        BuildOp::SpawnHull => {
            builder.spawn_hull();
        }
        BuildOp::SpawnCannon(cannon_type) => {
            builder.spawn_cannon(cannon_type);
        }
        BuildOp::SetHullClass(hull_class) => builder.set_hull_class(hull_class),
        BuildOp::AddCategory { name, folder } => {
            builder.add_category(&name, &folder)?;
        }
        BuildOp::RemoveCategory(index) => {
            builder.remove_category(index)?;
        }
        BuildOp::SpawnAccessory(category) => {
            builder.spawn_accessory(category)?;
        }
        BuildOp::CopyAccessory { target, source } => {
            builder.copy_accessory(target, source)?;
        }
        BuildOp::MakeWeaponMount(accessory) => {
            builder.make_weapon_mount(accessory)?;
        }
        BuildOp::SetAccessorySlot { accessory, slot } => {
            builder.set_accessory_slot(accessory, slot)?;
        }
        BuildOp::EditAccessory { accessory, edit } => {
            builder.edit_accessory(accessory, edit)?;
        }
        BuildOp::AddMovementSystem => {
            builder.add_movement_system();
        }
        BuildOp::AddWeaponSystem { loadout } => {
            let loadout = resolve_loadout(&loadout, registry)?;
            builder.add_weapon_system(loadout);
        }
        BuildOp::AddCameraSystem => {
            builder.add_camera_system();
        }
        BuildOp::EraseAll => builder.erase_all(),
    }
    Ok(())
}

pub(crate) fn apply_build_commands(
    mut commands: Commands,
    mut requests: MessageReader<BuildRequest>,
    mut session: ResMut<BuilderSession>,
    mut tanks: Query<&mut TankAssembly>,
    library: Res<SpriteLibrary>,
    defaults: Res<TankDefaults>,
    registry: Res<ContentRegistry>,
) {
    for request in requests.read() {
        if let Some(reason) = session.halt_reason() {
            warn!("Builder halted ({}), dropping {:?}", reason, request.op);
            continue;
        }

        let Ok(mut assembly) = tanks.get_mut(request.tank) else {
            let error = BuilderError::MissingAssembly(request.tank);
            error!("{}", error);
            session.halt(error);
            continue;
        };

        let mut builder = TankBuilder::new(
            &mut commands,
            request.tank,
            &mut assembly,
            &library,
            &defaults,
        );
        match apply_op(&mut builder, request.op.clone(), &registry) {
            Ok(()) => debug!("Tank {:?}: applied {:?}", request.tank, request.op),
            Err(error) if error.is_configuration() => {
                error!("Tank {:?}: {}", request.tank, error)
            }
            Err(error) => warn!("Tank {:?}: {}", request.tank, error),
        }
    }
}
