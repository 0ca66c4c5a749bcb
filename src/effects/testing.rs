//! Recording collaborators for tests in other domains.

use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use super::{AssetRegistry, AudioRegistry, Effects, NONE_SOUND};

#[derive(Debug, Default)]
pub(crate) struct EffectLog {
    /// (asset id, position, rotation) of every successful spawn
    pub spawned: Vec<(String, Vec2, f32)>,
    pub played: Vec<String>,
    pub stopped: Vec<String>,
}

pub(crate) type SharedLog = Arc<Mutex<EffectLog>>;

pub(crate) struct RecordingAssets {
    known: Vec<String>,
    log: SharedLog,
}

impl AssetRegistry for RecordingAssets {
    fn spawn(
        &self,
        commands: &mut Commands,
        asset_id: &str,
        position: Vec2,
        rotation: f32,
    ) -> Option<Entity> {
        if !self.contains(asset_id) {
            return None;
        }
        self.log
            .lock()
            .unwrap()
            .spawned
            .push((asset_id.to_string(), position, rotation));
        let entity = commands.spawn((
            Name::new(asset_id.to_string()),
            Transform::from_translation(position.extend(0.0))
                .with_rotation(Quat::from_rotation_z(rotation)),
        ));
        Some(entity.id())
    }

    fn contains(&self, asset_id: &str) -> bool {
        self.known.iter().any(|id| id == asset_id)
    }
}

pub(crate) struct RecordingAudio {
    log: SharedLog,
}

impl AudioRegistry for RecordingAudio {
    fn play(&self, _commands: &mut Commands, sound_id: &str) {
        if sound_id != NONE_SOUND {
            self.log.lock().unwrap().played.push(sound_id.to_string());
        }
    }

    fn stop(&self, _commands: &mut Commands, sound_id: &str) {
        self.log.lock().unwrap().stopped.push(sound_id.to_string());
    }

    fn pause(&self, _commands: &mut Commands, _sound_id: &str) {}

    fn is_playing(&self, sound_id: &str) -> bool {
        self.log.lock().unwrap().played.iter().any(|id| id == sound_id)
    }
}

/// Effects backed by recorders. Only `known_assets` spawn anything.
pub(crate) fn recording_effects(known_assets: &[&str]) -> (Effects, SharedLog) {
    let log = SharedLog::default();
    let effects = Effects::new(
        RecordingAssets {
            known: known_assets.iter().map(|id| id.to_string()).collect(),
            log: log.clone(),
        },
        RecordingAudio { log: log.clone() },
    );
    (effects, log)
}
