//! Assembly domain: a single attachable part and its clamped attributes.

use bevy::prelude::*;

use super::parts::ParentSlot;
use crate::content::{BoundsDef, vec2};

/// Local z of the first accessory, above every hull and cannon layer.
pub const ACCESSORY_Z_BASE: f32 = 0.1;
/// Local z step per render order.
pub const ORDER_Z_STEP: f32 = 0.01;
pub const MAX_ROTATION: f32 = 180.0;

/// Placement limits for accessories of one hull class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessoryBounds {
    pub half_extents: Vec2,
    pub scale_min: Vec2,
    pub scale_max: Vec2,
}

impl AccessoryBounds {
    pub fn from_def(def: &BoundsDef) -> Self {
        Self {
            half_extents: vec2(def.half_extents),
            scale_min: vec2(def.scale_min),
            scale_max: vec2(def.scale_max),
        }
    }

    pub fn clamp_position(&self, position: Vec2) -> Vec2 {
        position.clamp(-self.half_extents, self.half_extents)
    }

    pub fn clamp_scale(&self, scale: Vec2) -> Vec2 {
        scale.clamp(self.scale_min, self.scale_max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccessoryKind {
    Plain,
    /// Promoted to a weapon mount. The fire point is never removed.
    Weapon { fire_point: Entity },
}

/// Address of an accessory inside a [`super::TankAssembly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryRef {
    pub category: usize,
    pub index: usize,
}

impl AccessoryRef {
    pub fn new(category: usize, index: usize) -> Self {
        Self { category, index }
    }
}

/// One attribute change applied through a build request.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessoryEdit {
    Name(String),
    Style(usize),
    Position(Vec2),
    Rotation(f32),
    Scale(Vec2),
    Color(Color),
    Order(i32),
}

#[derive(Debug, Clone)]
pub struct Accessory {
    /// Visual node carrying Name, Transform and Sprite
    pub node: Entity,
    name: String,
    folder: String,
    style: usize,
    slot: ParentSlot,
    position: Vec2,
    /// Degrees
    rotation: f32,
    scale: Vec2,
    color: Color,
    order: i32,
    bounds: AccessoryBounds,
    kind: AccessoryKind,
    dirty: bool,
}

impl Accessory {
    pub fn new(
        node: Entity,
        name: impl Into<String>,
        folder: impl Into<String>,
        slot: ParentSlot,
        bounds: AccessoryBounds,
    ) -> Self {
        Self {
            node,
            name: name.into(),
            folder: folder.into(),
            style: 0,
            slot,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE.clamp(bounds.scale_min, bounds.scale_max),
            color: Color::WHITE,
            order: 0,
            bounds,
            kind: AccessoryKind::Plain,
            dirty: true,
        }
    }

    /// Copy every attribute onto a new node. The copy starts as a plain part;
    /// the builder promotes it when the source was a weapon.
    pub(crate) fn duplicate(&self, node: Entity) -> Self {
        Self {
            node,
            name: format!("{} copy", self.name),
            kind: AccessoryKind::Plain,
            dirty: true,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn style(&self) -> usize {
        self.style
    }

    pub fn slot(&self) -> ParentSlot {
        self.slot
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn bounds(&self) -> AccessoryBounds {
        self.bounds
    }

    pub fn kind(&self) -> AccessoryKind {
        self.kind
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, AccessoryKind::Weapon { .. })
    }

    pub fn fire_point(&self) -> Option<Entity> {
        match self.kind {
            AccessoryKind::Weapon { fire_point } => Some(fire_point),
            AccessoryKind::Plain => None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Local transform of the visual node.
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self
                .position
                .extend(ACCESSORY_Z_BASE + self.order as f32 * ORDER_Z_STEP),
            rotation: Quat::from_rotation_z(self.rotation.to_radians()),
            scale: self.scale.extend(1.0),
        }
    }

    // Setters clamp silently and return whether the stored value changed.

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update(|a| &mut a.name, name)
    }

    /// Clamp into the folder's variant range. Empty folders pin the style to 0.
    pub fn set_style(&mut self, style: usize, variant_count: usize) -> bool {
        self.update(|a| &mut a.style, style.min(variant_count.saturating_sub(1)))
    }

    pub fn set_position(&mut self, position: Vec2) -> bool {
        let position = self.bounds.clamp_position(position);
        self.update(|a| &mut a.position, position)
    }

    pub fn set_rotation(&mut self, degrees: f32) -> bool {
        self.update(|a| &mut a.rotation, degrees.clamp(-MAX_ROTATION, MAX_ROTATION))
    }

    pub fn set_scale(&mut self, scale: Vec2) -> bool {
        let scale = self.bounds.clamp_scale(scale);
        self.update(|a| &mut a.scale, scale)
    }

    pub fn set_color(&mut self, color: Color) -> bool {
        self.update(|a| &mut a.color, color)
    }

    pub fn set_order(&mut self, order: i32) -> bool {
        self.update(|a| &mut a.order, order)
    }

    /// Swap the placement limits and re-clamp position and scale.
    pub fn set_bounds(&mut self, bounds: AccessoryBounds) -> bool {
        self.bounds = bounds;
        let position = self.position;
        let scale = self.scale;
        let moved = self.set_position(position);
        let scaled = self.set_scale(scale);
        moved || scaled
    }

    pub fn apply_edit(&mut self, edit: AccessoryEdit, variant_count: usize) -> bool {
        match edit {
            AccessoryEdit::Name(name) => self.set_name(name),
            AccessoryEdit::Style(style) => self.set_style(style, variant_count),
            AccessoryEdit::Position(position) => self.set_position(position),
            AccessoryEdit::Rotation(degrees) => self.set_rotation(degrees),
            AccessoryEdit::Scale(scale) => self.set_scale(scale),
            AccessoryEdit::Color(color) => self.set_color(color),
            AccessoryEdit::Order(order) => self.set_order(order),
        }
    }

    pub(crate) fn set_slot(&mut self, slot: ParentSlot) {
        self.slot = slot;
    }

    pub(crate) fn promote(&mut self, fire_point: Entity) {
        if !self.is_weapon() {
            self.kind = AccessoryKind::Weapon { fire_point };
        }
    }

    /// Clear the dirty flag, returning whether it was set.
    pub(crate) fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn update<T: PartialEq>(&mut self, field: impl FnOnce(&mut Self) -> &mut T, value: T) -> bool {
        let slot = field(self);
        if *slot == value {
            return false;
        }
        *slot = value;
        self.dirty = true;
        true
    }
}
