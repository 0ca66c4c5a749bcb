//! Controls domain: keyboard sampling into named bindings.

use bevy::prelude::*;
use std::collections::HashMap;

use super::bindings::*;

/// State of one binding for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    /// Pressed since the last fixed tick consumed it
    pub just_pressed: bool,
    /// Continuous value in [-1, 1]
    pub axis: f32,
}

/// Per-binding input, filled every frame and read by fixed-tick systems.
#[derive(Resource, Debug, Default)]
pub struct ControlInput {
    states: HashMap<String, ControlState>,
}

impl ControlInput {
    /// State for a binding. Unknown bindings read as idle.
    pub fn state(&self, binding: &str) -> ControlState {
        self.states.get(binding).copied().unwrap_or_default()
    }

    pub fn axis(&self, binding: &str) -> f32 {
        self.state(binding).axis
    }

    /// Latch a press edge until [`ControlInput::clear_edges`].
    pub fn press(&mut self, binding: &str) {
        self.states.entry(binding.to_string()).or_default().just_pressed = true;
    }

    pub fn set_axis(&mut self, binding: &str, value: f32) {
        self.states.entry(binding.to_string()).or_default().axis = value.clamp(-1.0, 1.0);
    }

    pub fn clear_edges(&mut self) {
        for state in self.states.values_mut() {
            state.just_pressed = false;
        }
    }
}

/// Keys driving one binding. Negative keys pull the axis toward -1.
#[derive(Debug, Clone, Default)]
pub struct KeyBinding {
    pub positive: Vec<KeyCode>,
    pub negative: Vec<KeyCode>,
}

impl KeyBinding {
    pub fn button(key: KeyCode) -> Self {
        Self {
            positive: vec![key],
            negative: Vec::new(),
        }
    }

    pub fn axis(positive: KeyCode, negative: KeyCode) -> Self {
        Self {
            positive: vec![positive],
            negative: vec![negative],
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub bindings: HashMap<String, KeyBinding>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let bindings = [
            (FIRE_1, KeyBinding::button(KeyCode::Space)),
            (FIRE_2, KeyBinding::button(KeyCode::KeyQ)),
            (FIRE_3, KeyBinding::button(KeyCode::KeyE)),
            (VERTICAL, KeyBinding::axis(KeyCode::KeyW, KeyCode::KeyS)),
            (HORIZONTAL, KeyBinding::axis(KeyCode::KeyD, KeyCode::KeyA)),
            (ROTOR, KeyBinding::axis(KeyCode::ArrowRight, KeyCode::ArrowLeft)),
        ];

        Self {
            bindings: bindings
                .into_iter()
                .map(|(id, binding)| (id.to_string(), binding))
                .collect(),
        }
    }
}

pub(crate) fn read_control_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<InputBindings>,
    mut input: ResMut<ControlInput>,
) {
    for (id, binding) in &bindings.bindings {
        let mut axis = 0.0;
        if keyboard.any_pressed(binding.positive.iter().copied()) {
            axis += 1.0;
        }
        if keyboard.any_pressed(binding.negative.iter().copied()) {
            axis -= 1.0;
        }
        input.set_axis(id, axis);

        if keyboard.any_just_pressed(binding.positive.iter().copied()) {
            input.press(id);
        }
    }
}

pub(crate) fn clear_control_edges(mut input: ResMut<ControlInput>) {
    input.clear_edges();
}
