//! Effects domain: sound playback behind the audio registry interface.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::content::ContentRegistry;

/// Explicit "no sound" id. Accepted everywhere a sound id is.
pub const NONE_SOUND: &str = "None";

/// Plays registered sounds by id.
pub trait AudioRegistry: Send + Sync + 'static {
    fn play(&self, commands: &mut Commands, sound_id: &str);
    fn stop(&self, commands: &mut Commands, sound_id: &str);
    fn pause(&self, commands: &mut Commands, sound_id: &str);
    fn is_playing(&self, sound_id: &str) -> bool;

    /// Refresh tracked voices from their observed state and forget the gone
    /// ones. Called once per frame after all commands are applied.
    fn retain_voices(&self, _state_of: &dyn Fn(Entity) -> VoiceState) {}
}

/// What the world currently says about a voice entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Gone,
    /// Spawned but no sink yet; the recorded pause flag stands
    Starting,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy)]
struct Voice {
    entity: Entity,
    paused: bool,
}

#[derive(Debug, Clone)]
struct Sound {
    source: Handle<AudioSource>,
    volume: f32,
}

/// Default [`AudioRegistry`]: one despawn-on-finish `AudioPlayer` per play call.
#[derive(Debug, Default)]
pub struct SoundBank {
    sounds: HashMap<String, Sound>,
    voices: Mutex<HashMap<String, Vec<Voice>>>,
}

impl SoundBank {
    pub fn from_content(registry: &ContentRegistry, asset_server: &AssetServer) -> Self {
        let sounds = registry
            .sounds
            .iter()
            .map(|(id, def)| {
                (
                    id.clone(),
                    Sound {
                        source: asset_server.load(def.path.clone()),
                        volume: def.volume,
                    },
                )
            })
            .collect();

        Self {
            sounds,
            voices: Mutex::default(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, source: Handle<AudioSource>, volume: f32) {
        self.sounds.insert(id.into(), Sound { source, volume });
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Live voices of a sound. Returns nothing for unknown or sentinel ids.
    fn voices_of(&self, sound_id: &str) -> Vec<Voice> {
        self.voices
            .lock()
            .map(|voices| voices.get(sound_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lookup(&self, sound_id: &str) -> Option<&Sound> {
        if sound_id == NONE_SOUND {
            return None;
        }
        let sound = self.sounds.get(sound_id);
        if sound.is_none() {
            warn!("Sound '{}' is not registered", sound_id);
        }
        sound
    }
}

impl AudioRegistry for SoundBank {
    fn play(&self, commands: &mut Commands, sound_id: &str) {
        let Some(sound) = self.lookup(sound_id) else {
            return;
        };

        let voice = commands
            .spawn((
                Name::new(format!("Sound {}", sound_id)),
                AudioPlayer::new(sound.source.clone()),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(sound.volume)),
            ))
            .id();

        if let Ok(mut voices) = self.voices.lock() {
            voices.entry(sound_id.to_string()).or_default().push(Voice {
                entity: voice,
                paused: false,
            });
        }
    }

    fn stop(&self, commands: &mut Commands, sound_id: &str) {
        if self.lookup(sound_id).is_none() {
            return;
        }
        let Ok(mut voices) = self.voices.lock() else {
            return;
        };
        for voice in voices.remove(sound_id).unwrap_or_default() {
            commands.entity(voice.entity).try_despawn();
        }
    }

    fn pause(&self, commands: &mut Commands, sound_id: &str) {
        if self.lookup(sound_id).is_none() {
            return;
        }
        let Ok(mut voices) = self.voices.lock() else {
            return;
        };
        for voice in voices.get_mut(sound_id).into_iter().flatten() {
            voice.paused = true;
            let entity = voice.entity;
            commands.queue(move |world: &mut World| {
                if let Some(sink) = world.get::<AudioSink>(entity) {
                    sink.pause();
                }
            });
        }
    }

    fn is_playing(&self, sound_id: &str) -> bool {
        self.voices_of(sound_id).iter().any(|voice| !voice.paused)
    }

    fn retain_voices(&self, state_of: &dyn Fn(Entity) -> VoiceState) {
        let Ok(mut voices) = self.voices.lock() else {
            return;
        };
        voices.retain(|_, tracked| {
            tracked.retain_mut(|voice| match state_of(voice.entity) {
                VoiceState::Gone => false,
                VoiceState::Starting => true,
                VoiceState::Playing => {
                    voice.paused = false;
                    true
                }
                VoiceState::Paused => {
                    voice.paused = true;
                    true
                }
            });
            !tracked.is_empty()
        });
    }
}
