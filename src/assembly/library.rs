//! Assembly domain: sprite variants per folder.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::content::ContentRegistry;

/// Image handles of every sprite folder, indexed by accessory style.
#[derive(Resource, Debug, Default)]
pub struct SpriteLibrary {
    folders: HashMap<String, Vec<Handle<Image>>>,
}

impl SpriteLibrary {
    pub fn from_content(registry: &ContentRegistry, asset_server: &AssetServer) -> Self {
        let folders = registry
            .sprite_folders
            .iter()
            .map(|(id, def)| {
                let variants = def
                    .variants
                    .iter()
                    .map(|path| asset_server.load(path.clone()))
                    .collect();
                (id.clone(), variants)
            })
            .collect();
        Self { folders }
    }

    pub fn insert_folder(&mut self, folder: impl Into<String>, variants: Vec<Handle<Image>>) {
        self.folders.insert(folder.into(), variants);
    }

    /// Zero for unknown folders.
    pub fn variant_count(&self, folder: &str) -> usize {
        self.folders.get(folder).map_or(0, Vec::len)
    }

    /// Image for a style, or the default handle (plain quad) when absent.
    pub fn variant(&self, folder: &str, style: usize) -> Handle<Image> {
        self.folders
            .get(folder)
            .and_then(|variants| variants.get(style))
            .cloned()
            .unwrap_or_default()
    }
}

pub(crate) fn load_sprite_library(
    mut library: ResMut<SpriteLibrary>,
    registry: Res<ContentRegistry>,
    asset_server: Res<AssetServer>,
) {
    *library = SpriteLibrary::from_content(&registry, &asset_server);
    info!("Sprite library: {} folders", library.folders.len());
}
