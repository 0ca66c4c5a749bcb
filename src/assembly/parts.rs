//! Assembly domain: the tank root component and its structural parts.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::content::{BoundsDef, CannonDef, CannonLayoutDef, HullBoundsDef};

/// Multiplier from a cannon sprite's pivot offset to its fire point offset.
pub const FIRE_POINT_PIVOT_FACTOR: f32 = 2.0;

/// Which structural root an accessory hangs under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ParentSlot {
    #[default]
    Hull,
    Cannon,
}

/// Builder variant. Selects the accessory placement bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum HullClass {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl HullClass {
    pub fn bounds(self, defs: &HullBoundsDef) -> BoundsDef {
        match self {
            Self::Light => defs.light,
            Self::Medium => defs.medium,
            Self::Heavy => defs.heavy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CannonType {
    #[default]
    Single,
    Double,
}

impl CannonType {
    pub fn mounts(self) -> &'static [CannonMount] {
        match self {
            Self::Single => &[CannonMount::Single],
            Self::Double => &[CannonMount::Left, CannonMount::Right],
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Single => Self::Double,
            Self::Double => Self::Single,
        }
    }
}

/// Position of one cannon holder on the rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannonMount {
    Single,
    Left,
    Right,
}

impl CannonMount {
    pub fn holder_name(self) -> &'static str {
        match self {
            Self::Single => "CannonHolder",
            Self::Left => "CannonHolderLeft",
            Self::Right => "CannonHolderRight",
        }
    }

    pub fn layout(self, cannon: &CannonDef) -> CannonLayoutDef {
        match self {
            Self::Single => cannon.single,
            Self::Left => cannon.left,
            Self::Right => cannon.right,
        }
    }
}

/// Marks a transform that projectiles spawn from.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FirePoint;

/// Requests a rectangular tank collider. Resolved into avian components
/// by `attach_part_colliders`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PartCollider {
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct HullParts {
    pub root: Entity,
    pub body: Entity,
    pub coloring: Entity,
    pub shadow: Entity,
}

#[derive(Debug, Clone)]
pub struct CannonParts {
    /// Created once and kept across cannon rebuilds
    pub rotor: Entity,
    pub base: Entity,
    pub base_sides: Entity,
    pub holders: Vec<Entity>,
    pub sprites: Vec<Entity>,
    pub fire_points: Vec<Entity>,
    pub cannon_type: CannonType,
}

/// Builder state of one tank. Lives on the tank root entity.
#[derive(Component, Debug, Default)]
pub struct TankAssembly {
    pub hull_class: HullClass,
    pub hull: Option<HullParts>,
    pub cannon: Option<CannonParts>,
    pub categories: Vec<Category>,
    /// Follow camera spawned by the builder
    pub camera: Option<Entity>,
}

impl TankAssembly {
    pub fn new(hull_class: HullClass) -> Self {
        Self {
            hull_class,
            ..default()
        }
    }

    /// Root entity for a slot, if that root has been built.
    pub fn slot_root(&self, slot: ParentSlot) -> Option<Entity> {
        match slot {
            ParentSlot::Hull => self.hull.map(|hull| hull.root),
            ParentSlot::Cannon => self.cannon.as_ref().map(|cannon| cannon.rotor),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Cannon fire points in holder order. These drive the cannon slot table.
    pub fn cannon_fire_points(&self) -> Vec<Entity> {
        self.cannon
            .as_ref()
            .map(|cannon| cannon.fire_points.clone())
            .unwrap_or_default()
    }

    /// Weapon-mount fire points in category order.
    pub fn mount_fire_points(&self) -> Vec<Entity> {
        self.categories
            .iter()
            .flat_map(|category| category.accessories.iter())
            .filter_map(|accessory| accessory.fire_point())
            .collect()
    }
}
