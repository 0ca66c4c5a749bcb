//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::GameLayer;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

/// Convert a RON `(r, g, b, a)` array into an sRGB color.
pub fn rgba(c: [f32; 4]) -> Color {
    Color::srgba(c[0], c[1], c[2], c[3])
}

pub fn vec2(v: [f32; 2]) -> Vec2 {
    Vec2::from_array(v)
}

// ============================================================================
// Weapons (weapons.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    pub speed: f32,
    pub damage: f32,
    /// Seconds between shots
    pub cooldown: f32,
    pub collision_mask: Vec<GameLayer>,
    /// Prefab id spawned as the projectile
    pub projectile_asset: String,
    /// Sound id, or "None"
    pub shot_sound: String,
    /// Sound id, or "None"
    pub explosion_sound: String,
    pub muzzle_flash: Option<String>,
    pub explosion_effect: Option<String>,
}

// ============================================================================
// Prefabs (prefabs.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrefabDef {
    pub id: String,
    pub name: String,
    /// Image path relative to assets/, untextured quad when absent
    pub image: Option<String>,
    pub size: [f32; 2],
    pub color: [f32; 4],
    pub z: f32,
    /// Seconds until the spawned entity is removed
    pub lifetime: Option<f32>,
}

// ============================================================================
// Sounds (sounds.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoundDef {
    pub id: String,
    pub path: String,
    pub volume: f32,
}

// ============================================================================
// Sprite folders (sprite_folders.ron)
// ============================================================================

/// A folder of interchangeable sprite variants, indexed by accessory style.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpriteFolderDef {
    pub id: String,
    pub variants: Vec<String>,
}

// ============================================================================
// Tag reactions (tag_reactions.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagReactionDef {
    pub tag: String,
    pub effect: Option<String>,
    pub sound: String,
    pub destroy_target: bool,
}

// ============================================================================
// Tank defaults (tank_defaults.ron)
// ============================================================================

/// Builder layout, tuning and range setup. Loaded as a single struct.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct TankDefaults {
    pub hull: HullDef,
    pub cannon: CannonDef,
    pub bounds: HullBoundsDef,
    /// Category names whose accessories attach to the cannon rotor
    pub cannon_categories: Vec<String>,
    pub tank: TankTuningDef,
    pub camera: CameraDef,
    pub range: RangeDef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HullDef {
    pub size: [f32; 2],
    pub body_color: [f32; 4],
    pub coloring_color: [f32; 4],
    pub shadow_color: [f32; 4],
    pub shadow_offset: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CannonDef {
    pub base_size: [f32; 2],
    pub base_color: [f32; 4],
    pub sides_size: [f32; 2],
    pub sides_color: [f32; 4],
    pub single: CannonLayoutDef,
    pub left: CannonLayoutDef,
    pub right: CannonLayoutDef,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CannonLayoutDef {
    pub offset: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HullBoundsDef {
    pub light: BoundsDef,
    pub medium: BoundsDef,
    pub heavy: BoundsDef,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct BoundsDef {
    pub half_extents: [f32; 2],
    pub scale_min: [f32; 2],
    pub scale_max: [f32; 2],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TankTuningDef {
    pub move_speed: f32,
    /// Degrees per second
    pub turn_speed: f32,
    /// Degrees per second
    pub rotor_speed: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraDef {
    pub stiffness: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RangeDef {
    pub seed: u64,
    pub mines: u32,
    pub crates: u32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub crate_health: f32,
}

impl Default for TankDefaults {
    fn default() -> Self {
        Self {
            hull: HullDef {
                size: [56.0, 72.0],
                body_color: [1.0, 1.0, 1.0, 1.0],
                coloring_color: [0.42, 0.49, 0.31, 1.0],
                shadow_color: [0.0, 0.0, 0.0, 0.35],
                shadow_offset: [4.0, -4.0],
            },
            cannon: CannonDef {
                base_size: [32.0, 32.0],
                base_color: [0.36, 0.42, 0.27, 1.0],
                sides_size: [38.0, 24.0],
                sides_color: [0.28, 0.32, 0.2, 1.0],
                single: CannonLayoutDef {
                    offset: [0.0, 8.0],
                    size: [8.0, 40.0],
                    color: [0.3, 0.3, 0.3, 1.0],
                },
                left: CannonLayoutDef {
                    offset: [-7.0, 8.0],
                    size: [6.0, 36.0],
                    color: [0.3, 0.3, 0.3, 1.0],
                },
                right: CannonLayoutDef {
                    offset: [7.0, 8.0],
                    size: [6.0, 36.0],
                    color: [0.3, 0.3, 0.3, 1.0],
                },
            },
            bounds: HullBoundsDef {
                light: BoundsDef {
                    half_extents: [48.0, 64.0],
                    scale_min: [0.25, 0.25],
                    scale_max: [2.0, 2.0],
                },
                medium: BoundsDef {
                    half_extents: [64.0, 80.0],
                    scale_min: [0.25, 0.25],
                    scale_max: [3.0, 3.0],
                },
                heavy: BoundsDef {
                    half_extents: [80.0, 96.0],
                    scale_min: [0.25, 0.25],
                    scale_max: [4.0, 4.0],
                },
            },
            cannon_categories: vec!["Turret".to_string(), "Barrel".to_string()],
            tank: TankTuningDef {
                move_speed: 140.0,
                turn_speed: 90.0,
                rotor_speed: 120.0,
            },
            camera: CameraDef { stiffness: 6.0 },
            range: RangeDef {
                seed: 7,
                mines: 12,
                crates: 6,
                inner_radius: 180.0,
                outer_radius: 520.0,
                crate_health: 60.0,
            },
        }
    }
}
