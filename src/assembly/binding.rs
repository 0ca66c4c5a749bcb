//! Assembly domain: numeric get/set by field name for configuration UIs.

use bevy::prelude::*;

use super::accessory::Accessory;

/// Plain data binding. Setters go through the same clamping as the typed API
/// and return whether the value changed.
pub trait FieldBinding {
    fn field_names(&self) -> &'static [&'static str];
    fn get_field(&self, field: &str) -> Option<f32>;
    fn set_field(&mut self, field: &str, value: f32) -> bool;
}

impl FieldBinding for Accessory {
    fn field_names(&self) -> &'static [&'static str] {
        &[
            "position_x",
            "position_y",
            "rotation",
            "scale_x",
            "scale_y",
            "order",
        ]
    }

    fn get_field(&self, field: &str) -> Option<f32> {
        match field {
            "position_x" => Some(self.position().x),
            "position_y" => Some(self.position().y),
            "rotation" => Some(self.rotation()),
            "scale_x" => Some(self.scale().x),
            "scale_y" => Some(self.scale().y),
            "order" => Some(self.order() as f32),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: f32) -> bool {
        let position = self.position();
        let scale = self.scale();
        match field {
            "position_x" => self.set_position(Vec2::new(value, position.y)),
            "position_y" => self.set_position(Vec2::new(position.x, value)),
            "rotation" => self.set_rotation(value),
            "scale_x" => self.set_scale(Vec2::new(value, scale.y)),
            "scale_y" => self.set_scale(Vec2::new(scale.x, value)),
            "order" => self.set_order(value.round() as i32),
            _ => false,
        }
    }
}
