//! Content domain: RON data loading, registry and validation.

pub mod data;
pub mod loader;
pub mod registry;
pub mod validation;


pub use data::*;
pub use data::vec2;
pub use loader::{ContentLoadError, load_all_content};
pub use registry::ContentRegistry;
pub use validation::{RefTarget, ValidationError, validate_content};

use bevy::prelude::*;
use std::path::Path;

/// Directory holding the RON data files.
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentRegistry>()
            .init_resource::<TankDefaults>()
            .add_systems(Startup, load_content);
    }
}

/// Load every data file into the registry. Failures are logged and leave
/// defaults in place so the rest of startup can proceed.
pub fn load_content(mut registry: ResMut<ContentRegistry>, mut defaults: ResMut<TankDefaults>) {
    let (loaded, loaded_defaults, errors) = load_all_content(Path::new(CONTENT_DIR));

    for error in &errors {
        error!("{}", error);
    }

    for problem in validate_content(&loaded) {
        warn!("{}", problem);
    }

    info!("{}", loaded.summary());
    *registry = loaded;
    *defaults = loaded_defaults;
}
