//! Loader for RON content files at startup.

use ron::Options;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug, Error)]
#[error("Failed to load {file}: {message}")]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

/// Optional fields may be written without `Some(..)`.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("cannot read file: {}", e),
    })
}

/// Parse a RON string containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    Ok(data.items)
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: e.to_string(),
        })
}

/// Read `file` under `base_path` and insert every item under its key.
/// A failure leaves `table` untouched and is pushed onto `errors`.
fn load_table<T>(
    base_path: &Path,
    file: &str,
    key: fn(&T) -> &str,
    table: &mut HashMap<String, T>,
    errors: &mut Vec<ContentLoadError>,
) where
    T: for<'de> serde::Deserialize<'de>,
{
    let path = base_path.join(file);
    let items = read_file(&path).and_then(|contents| parse_data_file::<T>(file, &contents));
    match items {
        Ok(items) => table.extend(items.into_iter().map(|item| (key(&item).to_string(), item))),
        Err(e) => errors.push(e),
    }
}

/// Load all content from assets/data/*.ron.
///
/// Every file is attempted. Files that fail are reported in the returned error
/// list and leave their part of the registry empty; a missing or broken
/// tank_defaults.ron falls back to `TankDefaults::default()`.
pub fn load_all_content(
    base_path: &Path,
) -> (ContentRegistry, TankDefaults, Vec<ContentLoadError>) {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    load_table::<WeaponDef>(
        base_path,
        "weapons.ron",
        |w| w.id.as_str(),
        &mut registry.weapons,
        &mut errors,
    );
    load_table::<PrefabDef>(
        base_path,
        "prefabs.ron",
        |p| p.id.as_str(),
        &mut registry.prefabs,
        &mut errors,
    );
    load_table::<SoundDef>(
        base_path,
        "sounds.ron",
        |s| s.id.as_str(),
        &mut registry.sounds,
        &mut errors,
    );
    load_table::<SpriteFolderDef>(
        base_path,
        "sprite_folders.ron",
        |f| f.id.as_str(),
        &mut registry.sprite_folders,
        &mut errors,
    );
    load_table::<TagReactionDef>(
        base_path,
        "tag_reactions.ron",
        |r| r.tag.as_str(),
        &mut registry.tag_reactions,
        &mut errors,
    );

    let defaults = read_file(&base_path.join("tank_defaults.ron"))
        .and_then(|contents| parse_single::<TankDefaults>("tank_defaults.ron", &contents))
        .unwrap_or_else(|e| {
            errors.push(e);
            TankDefaults::default()
        });

    (registry, defaults, errors)
}
