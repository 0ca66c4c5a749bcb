//! Effects domain: asset and audio collaborators injected into gameplay code.
//!
//! Weapons, projectiles and tag reactions never touch images or audio sources
//! directly. They go through the [`Effects`] resource, which holds the two
//! registries as trait objects so a host (or a test) can swap them out.

mod assets;
mod audio;

#[cfg(test)]
pub(crate) mod testing;


pub use assets::{AssetRegistry, Lifetime, Prefab, PrefabRegistry};
pub(crate) use assets::expire_lifetimes;
pub use audio::{AudioRegistry, NONE_SOUND, SoundBank, VoiceState};

use bevy::audio::AudioSinkPlayback;
use bevy::prelude::*;
use std::sync::Arc;

use crate::content::{ContentRegistry, load_content};
use crate::core::SimSet;

/// Shared handles to the asset and audio collaborators.
#[derive(Resource, Clone)]
pub struct Effects {
    pub assets: Arc<dyn AssetRegistry>,
    pub audio: Arc<dyn AudioRegistry>,
}

impl Effects {
    pub fn new(assets: impl AssetRegistry, audio: impl AudioRegistry) -> Self {
        Self {
            assets: Arc::new(assets),
            audio: Arc::new(audio),
        }
    }

    /// Spawn an optional effect prefab. `None` ids are silently skipped.
    pub fn spawn_effect(
        &self,
        commands: &mut Commands,
        asset_id: Option<&str>,
        position: Vec2,
        rotation: f32,
    ) -> Option<Entity> {
        asset_id.and_then(|id| self.assets.spawn(commands, id, position, rotation))
    }
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            setup_effects
                .after(load_content)
                .run_if(not(resource_exists::<Effects>)),
        )
        .add_systems(Last, prune_finished_voices)
        .add_systems(FixedUpdate, expire_lifetimes.before(SimSet::Travel));
    }
}

/// Build the default prefab and sound registries from loaded content.
/// Skipped when the host inserted its own [`Effects`].
fn setup_effects(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    asset_server: Res<AssetServer>,
) {
    let prefabs = PrefabRegistry::from_content(&registry, &asset_server);
    let sounds = SoundBank::from_content(&registry, &asset_server);
    info!(
        "Effects ready: {} prefabs, {} sounds",
        prefabs.len(),
        sounds.len()
    );
    commands.insert_resource(Effects::new(prefabs, sounds));
}

/// Sync tracked voices with their sinks. Runs in `Last` so voices spawned
/// by any earlier schedule this frame already exist.
pub(crate) fn prune_finished_voices(
    effects: Res<Effects>,
    players: Query<Option<&AudioSink>, With<AudioPlayer>>,
) {
    effects.audio.retain_voices(&|voice| match players.get(voice) {
        Err(_) => VoiceState::Gone,
        Ok(None) => VoiceState::Starting,
        Ok(Some(sink)) if sink.is_paused() => VoiceState::Paused,
        Ok(Some(_)) => VoiceState::Playing,
    });
}
