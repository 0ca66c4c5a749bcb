//! Assembly domain: named accessory groups and their name rules.

use bevy::prelude::*;

use super::accessory::Accessory;
use super::errors::BuilderError;
use super::parts::ParentSlot;

/// Names owned by the structural parts of every tank.
pub const RESERVED_CATEGORY_NAMES: [&str; 3] = ["Hull", "Cannon", "Base"];

/// Container nodes of one category, one per structural root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Containers {
    pub hull: Option<Entity>,
    pub cannon: Option<Entity>,
}

impl Containers {
    pub fn get(&self, slot: ParentSlot) -> Option<Entity> {
        match slot {
            ParentSlot::Hull => self.hull,
            ParentSlot::Cannon => self.cannon,
        }
    }

    pub fn set(&mut self, slot: ParentSlot, container: Entity) {
        match slot {
            ParentSlot::Hull => self.hull = Some(container),
            ParentSlot::Cannon => self.cannon = Some(container),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> {
        self.hull.into_iter().chain(self.cannon)
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    /// Sprite folder shared by every accessory created here
    pub folder: String,
    pub default_slot: ParentSlot,
    pub containers: Containers,
    pub accessories: Vec<Accessory>,
    // Editor-facing only
    pub expanded: bool,
    pub editing: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, folder: impl Into<String>, default_slot: ParentSlot) -> Self {
        Self {
            name: name.into(),
            folder: folder.into(),
            default_slot,
            containers: Containers::default(),
            accessories: Vec::new(),
            expanded: true,
            editing: false,
        }
    }

    pub fn container_name(&self) -> String {
        format!("{}Container", self.name)
    }
}

/// Reject empty, reserved (any case) and already used names.
pub fn validate_category_name(name: &str, existing: &[Category]) -> Result<(), BuilderError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BuilderError::EmptyCategoryName);
    }
    if RESERVED_CATEGORY_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(trimmed))
    {
        return Err(BuilderError::ReservedCategoryName(name.to_string()));
    }
    if existing.iter().any(|category| category.name == name) {
        return Err(BuilderError::DuplicateCategory(name.to_string()));
    }
    Ok(())
}

/// Categories named in `cannon_categories` ride the rotor; the rest sit on the hull.
pub fn default_slot_for(name: &str, cannon_categories: &[String]) -> ParentSlot {
    if cannon_categories
        .iter()
        .any(|cannon| cannon.eq_ignore_ascii_case(name.trim()))
    {
        ParentSlot::Cannon
    } else {
        ParentSlot::Hull
    }
}
