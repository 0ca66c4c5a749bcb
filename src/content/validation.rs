//! Cross-reference checks between loaded definitions.

use std::collections::HashMap;

use thiserror::Error;

use super::registry::ContentRegistry;
use crate::effects::NONE_SOUND;

/// Kind of definition a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    Prefab,
    Sound,
}

/// A dangling reference found in the registry.
#[derive(Debug, Error)]
#[error("{owner} '{owner_id}' field '{field}' points at missing {target:?} '{missing_id}'")]
pub struct ValidationError {
    pub owner: &'static str,
    pub owner_id: String,
    pub field: &'static str,
    pub target: RefTarget,
    pub missing_id: String,
}

struct Checker<'a> {
    registry: &'a ContentRegistry,
    owner: &'static str,
    owner_id: &'a str,
    errors: &'a mut Vec<ValidationError>,
}

impl Checker<'_> {
    fn check<T>(
        &mut self,
        table: &HashMap<String, T>,
        target: RefTarget,
        field: &'static str,
        id: &str,
    ) {
        if table.contains_key(id) {
            return;
        }
        self.errors.push(ValidationError {
            owner: self.owner,
            owner_id: self.owner_id.to_string(),
            field,
            target,
            missing_id: id.to_string(),
        });
    }

    fn prefab(&mut self, field: &'static str, id: Option<&str>) {
        let registry = self.registry;
        if let Some(id) = id {
            self.check(&registry.prefabs, RefTarget::Prefab, field, id);
        }
    }

    fn sound(&mut self, field: &'static str, id: &str) {
        let registry = self.registry;
        if id != NONE_SOUND {
            self.check(&registry.sounds, RefTarget::Sound, field, id);
        }
    }
}

/// Every weapon and tag reaction must point at registered prefabs and sounds.
/// An empty result means the registry is consistent.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, weapon) in &registry.weapons {
        let mut checker = Checker {
            registry,
            owner: "Weapon",
            owner_id: id,
            errors: &mut errors,
        };
        checker.prefab("projectile_asset", Some(&weapon.projectile_asset));
        checker.prefab("muzzle_flash", weapon.muzzle_flash.as_deref());
        checker.prefab("explosion_effect", weapon.explosion_effect.as_deref());
        checker.sound("shot_sound", &weapon.shot_sound);
        checker.sound("explosion_sound", &weapon.explosion_sound);
    }

    for (tag, reaction) in &registry.tag_reactions {
        let mut checker = Checker {
            registry,
            owner: "TagReaction",
            owner_id: tag,
            errors: &mut errors,
        };
        checker.prefab("effect", reaction.effect.as_deref());
        checker.sound("sound", &reaction.sound);
    }

    errors
}
