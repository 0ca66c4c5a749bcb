//! ContentRegistry resource providing HashMap lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded tank content.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub weapons: HashMap<String, WeaponDef>,
    pub prefabs: HashMap<String, PrefabDef>,
    pub sounds: HashMap<String, SoundDef>,
    pub sprite_folders: HashMap<String, SpriteFolderDef>,
    /// Keyed by tag
    pub tag_reactions: HashMap<String, TagReactionDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Weapons: {}\n\
             - Prefabs: {}\n\
             - Sounds: {}\n\
             - Sprite Folders: {}\n\
             - Tag Reactions: {}",
            self.weapons.len(),
            self.prefabs.len(),
            self.sounds.len(),
            self.sprite_folders.len(),
            self.tag_reactions.len(),
        )
    }

    pub fn total_count(&self) -> usize {
        self.weapons.len()
            + self.prefabs.len()
            + self.sounds.len()
            + self.sprite_folders.len()
            + self.tag_reactions.len()
    }
}
