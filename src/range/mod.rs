//! Range domain: a seeded firing range of mines and crates around the origin.


use avian2d::prelude::*;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;

use crate::content::{TankDefaults, load_content};
use crate::core::GameLayer;
use crate::projectile::{Health, TargetTag};

pub const MINE_TAG: &str = "Mine";
pub const CRATE_TAG: &str = "Crate";

const MINE_RADIUS: f32 = 10.0;
const CRATE_SIZE: f32 = 28.0;

/// Marks every entity spawned by the range so it can be cleared.
#[derive(Component, Debug, Clone, Copy)]
pub struct RangeTarget;

pub struct RangePlugin;

impl Plugin for RangePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_range.after(load_content));
    }
}

/// `count` points in the ring between `inner` and `outer` radius.
pub fn scatter_positions(rng: &mut impl Rng, count: u32, inner: f32, outer: f32) -> Vec<Vec2> {
    let inner = inner.max(0.0);
    let outer = outer.max(inner);

    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let radius = if outer > inner {
                rng.random_range(inner..outer)
            } else {
                inner
            };
            Vec2::from_angle(angle) * radius
        })
        .collect()
}

fn spawn_range(mut commands: Commands, defaults: Res<TankDefaults>) {
    let range = &defaults.range;
    let mut rng = ChaCha8Rng::seed_from_u64(range.seed);

    let mines = scatter_positions(&mut rng, range.mines, range.inner_radius, range.outer_radius);
    for position in &mines {
        commands.spawn((
            Name::new("Mine"),
            RangeTarget,
            TargetTag(MINE_TAG.to_string()),
            Sprite {
                color: Color::srgb(0.75, 0.2, 0.15),
                custom_size: Some(Vec2::splat(MINE_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(0.05)),
            RigidBody::Static,
            Collider::circle(MINE_RADIUS),
            CollisionLayers::new(GameLayer::Target, [GameLayer::Tank]),
        ));
    }

    let crates = scatter_positions(&mut rng, range.crates, range.inner_radius, range.outer_radius);
    for position in &crates {
        commands.spawn((
            Name::new("Crate"),
            RangeTarget,
            TargetTag(CRATE_TAG.to_string()),
            Health::new(range.crate_health),
            Sprite {
                color: Color::srgb(0.55, 0.4, 0.22),
                custom_size: Some(Vec2::splat(CRATE_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(0.05)),
            RigidBody::Static,
            Collider::rectangle(CRATE_SIZE, CRATE_SIZE),
            CollisionLayers::new(GameLayer::Target, [GameLayer::Tank]),
        ));
    }

    info!(
        "Firing range: {} mines, {} crates (seed {})",
        mines.len(),
        crates.len(),
        range.seed
    );
}
