//! Assembly domain: the tank builder.
//!
//! `TankBuilder` is a short-lived view over one tank's [`TankAssembly`]. Every
//! structural change is issued through `Commands`, so entity ids are valid
//! immediately and the hierarchy materializes on the next command flush.

use bevy::prelude::*;

use super::accessory::{Accessory, AccessoryBounds, AccessoryEdit, AccessoryRef};
use super::category::{Category, default_slot_for, validate_category_name};
use super::errors::BuilderError;
use super::library::SpriteLibrary;
use super::parts::{
    CannonParts, CannonType, FIRE_POINT_PIVOT_FACTOR, FirePoint, HullClass, HullParts,
    ParentSlot, PartCollider, TankAssembly,
};
use crate::content::{TankDefaults, rgba, vec2};
use crate::controls::{CameraFollow, TankController};
use crate::weapons::{Loadout, WeaponController};

/// Sprite folder holding the hull body (variant 0) and coloring mask (variant 1).
pub const HULL_FOLDER: &str = "Hull";
pub const CANNON_FOLDER: &str = "Cannon";
/// Sprite folder holding the base (variant 0) and base sides (variant 1).
pub const BASE_FOLDER: &str = "Base";

/// Local z step between stacked part layers.
const PART_Z_STEP: f32 = 0.01;
/// Rotor sits above the hull and every hull accessory.
const ROTOR_Z: f32 = 0.5;
/// Local offset of a weapon mount's fire point along the accessory's +Y.
pub const MOUNT_FIRE_POINT_OFFSET: f32 = 16.0;

pub struct TankBuilder<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    root: Entity,
    assembly: &'a mut TankAssembly,
    library: &'a SpriteLibrary,
    defaults: &'a TankDefaults,
}

impl<'a, 'w, 's> TankBuilder<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        root: Entity,
        assembly: &'a mut TankAssembly,
        library: &'a SpriteLibrary,
        defaults: &'a TankDefaults,
    ) -> Self {
        Self {
            commands,
            root,
            assembly,
            library,
            defaults,
        }
    }

    fn bounds(&self) -> AccessoryBounds {
        AccessoryBounds::from_def(&self.assembly.hull_class.bounds(&self.defaults.bounds))
    }

    fn layer(
        &mut self,
        name: &str,
        sprite: Sprite,
        z_layer: u32,
        offset: Vec2,
        parent: Entity,
    ) -> Entity {
        self.commands
            .spawn((
                Name::new(name.to_string()),
                sprite,
                Transform::from_translation(offset.extend(z_layer as f32 * PART_Z_STEP)),
                ChildOf(parent),
            ))
            .id()
    }

    fn node(&mut self, name: impl Into<String>, transform: Transform, parent: Entity) -> Entity {
        self.commands
            .spawn((
                Name::new(name.into()),
                transform,
                Visibility::default(),
                ChildOf(parent),
            ))
            .id()
    }

    fn fire_point(&mut self, offset: Vec2, parent: Entity) -> Entity {
        self.commands
            .spawn((
                Name::new("FirePoint"),
                FirePoint,
                Transform::from_translation(offset.extend(0.0)),
                ChildOf(parent),
            ))
            .id()
    }

    // ========================================================================
    // Hull and cannon
    // ========================================================================

    /// Build the hull once. Later calls return the existing hull root.
    pub fn spawn_hull(&mut self) -> Entity {
        if let Some(hull) = self.assembly.hull {
            return hull.root;
        }

        let def = self.defaults.hull.clone();
        let size = vec2(def.size);
        let body_image = self.library.variant(HULL_FOLDER, 0);
        let coloring_image = self.library.variant(HULL_FOLDER, 1);

        let root = self.node("Hull", Transform::default(), self.root);
        let shadow = self.layer(
            "HullShadow",
            sized_sprite(body_image.clone(), rgba(def.shadow_color), size),
            0,
            vec2(def.shadow_offset),
            root,
        );
        let body = self.layer(
            "HullBody",
            sized_sprite(body_image, rgba(def.body_color), size),
            1,
            Vec2::ZERO,
            root,
        );
        self.commands.entity(body).insert(PartCollider { size });
        let coloring = self.layer(
            "HullColoring",
            sized_sprite(coloring_image, rgba(def.coloring_color), size),
            2,
            Vec2::ZERO,
            root,
        );

        self.assembly.hull = Some(HullParts {
            root,
            body,
            coloring,
            shadow,
        });
        info!("Tank {:?}: hull built", self.root);
        root
    }

    /// Rebuild base and holders for `cannon_type`. The rotor survives, so
    /// cannon-slot accessories stay attached; every holder, sprite and fire
    /// point handle from the previous build is discarded.
    pub fn spawn_cannon(&mut self, cannon_type: CannonType) -> Entity {
        let rotor = match self.assembly.cannon.take() {
            Some(previous) => {
                for entity in [previous.base, previous.base_sides]
                    .into_iter()
                    .chain(previous.holders)
                {
                    self.commands.entity(entity).try_despawn();
                }
                previous.rotor
            }
            None => self.node(
                "CannonRotor",
                Transform::from_xyz(0.0, 0.0, ROTOR_Z),
                self.root,
            ),
        };

        let def = self.defaults.cannon.clone();
        let base_sides = self.layer(
            "BaseSides",
            sized_sprite(
                self.library.variant(BASE_FOLDER, 1),
                rgba(def.sides_color),
                vec2(def.sides_size),
            ),
            0,
            Vec2::ZERO,
            rotor,
        );
        let base = self.layer(
            "Base",
            sized_sprite(
                self.library.variant(BASE_FOLDER, 0),
                rgba(def.base_color),
                vec2(def.base_size),
            ),
            1,
            Vec2::ZERO,
            rotor,
        );

        let mut holders = Vec::new();
        let mut sprites = Vec::new();
        let mut fire_points = Vec::new();

        for mount in cannon_type.mounts() {
            let layout = mount.layout(&def);
            let size = vec2(layout.size);
            // Sprite grows forward from the holder, so its center is the pivot offset
            let pivot = Vec2::new(0.0, size.y * 0.5);

            let holder = self.node(
                mount.holder_name(),
                Transform::from_translation(vec2(layout.offset).extend(2.0 * PART_Z_STEP)),
                rotor,
            );
            let sprite = self.layer(
                "CannonSprite",
                sized_sprite(
                    self.library.variant(CANNON_FOLDER, 0),
                    rgba(layout.color),
                    size,
                ),
                0,
                pivot,
                holder,
            );
            self.commands.entity(sprite).insert(PartCollider { size });
            let fire_point = self.fire_point(pivot * FIRE_POINT_PIVOT_FACTOR, holder);

            holders.push(holder);
            sprites.push(sprite);
            fire_points.push(fire_point);
        }

        self.assembly.cannon = Some(CannonParts {
            rotor,
            base,
            base_sides,
            holders,
            sprites,
            fire_points,
            cannon_type,
        });
        self.rewire_weapons();
        info!("Tank {:?}: {:?} cannon built", self.root, cannon_type);
        rotor
    }

    /// Change the hull class and re-clamp every accessory to the new bounds.
    pub fn set_hull_class(&mut self, hull_class: HullClass) {
        self.assembly.hull_class = hull_class;
        let bounds = self.bounds();
        for accessory in self
            .assembly
            .categories
            .iter_mut()
            .flat_map(|category| category.accessories.iter_mut())
        {
            accessory.set_bounds(bounds);
        }
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// Register a category and create its containers under every existing root.
    pub fn add_category(&mut self, name: &str, folder: &str) -> Result<usize, BuilderError> {
        validate_category_name(name, &self.assembly.categories)?;

        let slot = default_slot_for(name, &self.defaults.cannon_categories);
        self.assembly
            .categories
            .push(Category::new(name, folder, slot));
        let index = self.assembly.categories.len() - 1;

        for slot in [ParentSlot::Hull, ParentSlot::Cannon] {
            self.ensure_container(index, slot);
        }
        Ok(index)
    }

    /// Remove a category and despawn both of its containers with every accessory.
    pub fn remove_category(&mut self, index: usize) -> Result<Category, BuilderError> {
        if index >= self.assembly.categories.len() {
            return Err(BuilderError::CategoryOutOfRange(index));
        }

        let category = self.assembly.categories.remove(index);
        for container in category.containers.iter() {
            self.commands.entity(container).try_despawn();
        }
        if category.accessories.iter().any(Accessory::is_weapon) {
            self.rewire_weapons();
        }
        Ok(category)
    }

    /// Container of a category under `slot`, created on first use. `None`
    /// while that slot's root does not exist yet.
    fn ensure_container(&mut self, index: usize, slot: ParentSlot) -> Option<Entity> {
        let category = self.assembly.categories.get(index)?;
        if let Some(container) = category.containers.get(slot) {
            return Some(container);
        }

        let root = self.assembly.slot_root(slot)?;
        let name = category.container_name();
        let container = self.node(name, Transform::default(), root);
        self.assembly.categories[index]
            .containers
            .set(slot, container);
        Some(container)
    }

    // ========================================================================
    // Accessories
    // ========================================================================

    /// Append a fresh accessory under the category's default slot.
    pub fn spawn_accessory(&mut self, category: usize) -> Result<Option<AccessoryRef>, BuilderError> {
        let target = self
            .assembly
            .categories
            .get(category)
            .ok_or(BuilderError::CategoryOutOfRange(category))?;
        let slot = target.default_slot;
        let name = format!("{} {}", target.name, target.accessories.len() + 1);
        let folder = target.folder.clone();

        let Some(container) = self.ensure_container(category, slot) else {
            debug!("Tank {:?}: {:?} root not built yet", self.root, slot);
            return Ok(None);
        };

        let node = self
            .commands
            .spawn((Name::new(name.clone()), ChildOf(container)))
            .id();
        let accessory = Accessory::new(node, name, folder, slot, self.bounds());
        self.insert_visuals(&accessory);

        Ok(Some(self.push_accessory(category, accessory)))
    }

    /// Append a deep copy of `source` to category `target`. The copy keeps the
    /// source's slot, style and transform and gets its own node and fire point.
    pub fn copy_accessory(
        &mut self,
        target: usize,
        source: AccessoryRef,
    ) -> Result<Option<AccessoryRef>, BuilderError> {
        if target >= self.assembly.categories.len() {
            return Err(BuilderError::CategoryOutOfRange(target));
        }
        let original = accessory(self.assembly, source)?.clone();

        let Some(container) = self.ensure_container(target, original.slot()) else {
            debug!("Tank {:?}: {:?} root not built yet", self.root, original.slot());
            return Ok(None);
        };

        let node = self.commands.spawn(ChildOf(container)).id();
        let mut copy = original.duplicate(node);
        self.insert_visuals(&copy);

        let is_weapon = original.is_weapon();
        if is_weapon {
            let fire_point = self.fire_point(Vec2::new(0.0, MOUNT_FIRE_POINT_OFFSET), node);
            copy.promote(fire_point);
        }

        let copied = self.push_accessory(target, copy);
        if is_weapon {
            self.rewire_weapons();
        }
        Ok(Some(copied))
    }

    /// Attach a fire point so the accessory joins the weapon loadout.
    /// Already promoted accessories keep their fire point.
    pub fn make_weapon_mount(&mut self, at: AccessoryRef) -> Result<Option<Entity>, BuilderError> {
        let target = accessory(self.assembly, at)?;
        if let Some(fire_point) = target.fire_point() {
            return Ok(Some(fire_point));
        }
        if target.slot() == ParentSlot::Cannon && self.assembly.cannon.is_none() {
            debug!("Tank {:?}: cannon not built yet", self.root);
            return Ok(None);
        }

        let node = target.node;
        let fire_point = self.fire_point(Vec2::new(0.0, MOUNT_FIRE_POINT_OFFSET), node);
        accessory_mut(self.assembly, at)?.promote(fire_point);
        self.rewire_weapons();
        Ok(Some(fire_point))
    }

    /// Reparent an accessory between hull and cannon. No-op when it is
    /// already under `slot`. Returns whether it moved.
    pub fn set_accessory_slot(&mut self, at: AccessoryRef, slot: ParentSlot) -> Result<bool, BuilderError> {
        let target = accessory(self.assembly, at)?;
        if target.slot() == slot {
            return Ok(false);
        }
        let node = target.node;

        let Some(container) = self.ensure_container(at.category, slot) else {
            debug!("Tank {:?}: {:?} root not built yet", self.root, slot);
            return Ok(false);
        };

        self.commands.entity(node).insert(ChildOf(container));
        accessory_mut(self.assembly, at)?.set_slot(slot);
        Ok(true)
    }

    /// Apply one attribute edit. Returns whether anything changed.
    pub fn edit_accessory(&mut self, at: AccessoryRef, edit: AccessoryEdit) -> Result<bool, BuilderError> {
        let target = accessory_mut(self.assembly, at)?;
        let variants = self.library.variant_count(target.folder());
        Ok(target.apply_edit(edit, variants))
    }

    fn insert_visuals(&mut self, accessory: &Accessory) {
        let sprite = Sprite {
            image: self.library.variant(accessory.folder(), accessory.style()),
            color: accessory.color(),
            ..default()
        };
        self.commands.entity(accessory.node).insert((
            Name::new(accessory.name().to_string()),
            sprite,
            accessory.transform(),
        ));
    }

    fn push_accessory(&mut self, category: usize, accessory: Accessory) -> AccessoryRef {
        let accessories = &mut self.assembly.categories[category].accessories;
        accessories.push(accessory);
        AccessoryRef::new(category, accessories.len() - 1)
    }

    // ========================================================================
    // Reset
    // ========================================================================

    /// Despawn every node under the root and forget all handles and controllers.
    pub fn erase_all(&mut self) {
        self.commands
            .entity(self.root)
            .despawn_related::<Children>()
            .remove::<(TankController, WeaponController)>();

        if let Some(camera) = self.assembly.camera.take() {
            self.commands.entity(camera).try_despawn();
        }

        self.assembly.categories.clear();
        self.assembly.hull = None;
        self.assembly.cannon = None;
        info!("Tank {:?}: erased", self.root);
    }

    // ========================================================================
    // Runtime controllers
    // ========================================================================

    /// Attach a [`TankController`]. Needs the hull.
    pub fn add_movement_system(&mut self) -> bool {
        if self.assembly.hull.is_none() {
            debug!("Tank {:?}: movement needs a hull", self.root);
            return false;
        }

        let tuning = &self.defaults.tank;
        let controller = TankController {
            rotor: self.assembly.cannon.as_ref().map(|cannon| cannon.rotor),
            move_speed: tuning.move_speed,
            turn_speed: tuning.turn_speed,
            rotor_speed: tuning.rotor_speed,
        };
        self.commands
            .entity(self.root)
            .remove::<TankController>()
            .insert(controller);
        true
    }

    /// Attach a [`WeaponController`] wired to the current cannon fire points and mounts.
    /// Needs the cannon.
    pub fn add_weapon_system(&mut self, loadout: Loadout) -> bool {
        if self.assembly.cannon.is_none() {
            debug!("Tank {:?}: weapons need a cannon", self.root);
            return false;
        }

        let fire_points = self.assembly.cannon_fire_points();
        let mounts = self.assembly.mount_fire_points();
        let controller = WeaponController::new(loadout, &fire_points, &mounts);
        info!(
            "Tank {:?}: weapon system with {} cannon fire points and {} mounts",
            self.root,
            fire_points.len(),
            mounts.len()
        );
        self.commands
            .entity(self.root)
            .remove::<WeaponController>()
            .insert(controller);
        true
    }

    /// Re-point an attached weapon controller at the current cannon fire points and mounts.
    fn rewire_weapons(&mut self) {
        let fire_points = self.assembly.cannon_fire_points();
        let mounts = self.assembly.mount_fire_points();
        self.commands
            .entity(self.root)
            .queue(move |mut entity: EntityWorldMut| {
                if let Some(mut controller) = entity.get_mut::<WeaponController>() {
                    controller.rewire(&fire_points, &mounts);
                }
            });
    }

    /// Spawn a follow camera tracking the hull. Needs the hull.
    pub fn add_camera_system(&mut self) -> Option<Entity> {
        let Some(hull) = self.assembly.hull else {
            debug!("Tank {:?}: camera needs a hull", self.root);
            return None;
        };

        if let Some(previous) = self.assembly.camera.take() {
            self.commands.entity(previous).try_despawn();
        }

        let camera = self
            .commands
            .spawn((
                Name::new("TankCamera"),
                Camera2d,
                CameraFollow {
                    target: hull.root,
                    stiffness: self.defaults.camera.stiffness,
                },
            ))
            .id();
        self.assembly.camera = Some(camera);
        Some(camera)
    }
}

fn sized_sprite(image: Handle<Image>, color: Color, size: Vec2) -> Sprite {
    Sprite {
        image,
        color,
        custom_size: Some(size),
        ..default()
    }
}

fn accessory(assembly: &TankAssembly, at: AccessoryRef) -> Result<&Accessory, BuilderError> {
    assembly
        .categories
        .get(at.category)
        .ok_or(BuilderError::CategoryOutOfRange(at.category))?
        .accessories
        .get(at.index)
        .ok_or(BuilderError::AccessoryOutOfRange {
            category: at.category,
            index: at.index,
        })
}

fn accessory_mut(assembly: &mut TankAssembly, at: AccessoryRef) -> Result<&mut Accessory, BuilderError> {
    assembly
        .categories
        .get_mut(at.category)
        .ok_or(BuilderError::CategoryOutOfRange(at.category))?
        .accessories
        .get_mut(at.index)
        .ok_or(BuilderError::AccessoryOutOfRange {
            category: at.category,
            index: at.index,
        })
}
