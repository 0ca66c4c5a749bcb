//! Projectile domain: travel, probe and explosion.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::components::{Health, Projectile, ProjectileTuning, StepOutcome, TargetTag};
use super::events::ProjectileExploded;
use super::reactions::{ReactionContext, TagReactions};
use crate::core::flat_angle;
use crate::effects::Effects;

/// Explosion effect and sound at the projectile, kept flat on the plane.
pub(crate) fn detonate(
    commands: &mut Commands,
    effects: &Effects,
    projectile: &Projectile,
    position: Vec2,
    rotation: Quat,
) {
    effects.spawn_effect(
        commands,
        projectile.explosion_effect.as_deref(),
        position,
        flat_angle(rotation),
    );
    effects.audio.play(commands, &projectile.explosion_sound);
}

/// Tag and placement of whatever a probe hit.
pub(crate) type TargetQuery<'w, 's> =
    Query<'w, 's, (Option<&'static TargetTag>, Option<&'static GlobalTransform>)>;

/// Step one projectile and resolve a hit: despawn it, detonate, then run the
/// target's tag reaction. Returns the explosion to announce, at most once per
/// projectile.
#[allow(clippy::too_many_arguments)]
pub(crate) fn advance_projectile(
    commands: &mut Commands,
    effects: &Effects,
    reactions: &TagReactions,
    targets: &TargetQuery,
    entity: Entity,
    projectile: &mut Projectile,
    transform: &mut Transform,
    dt: f32,
    probe: impl FnOnce(Vec2, Dir2) -> Option<Entity>,
) -> Option<ProjectileExploded> {
    let target = match projectile.step(transform, dt, probe) {
        StepOutcome::Travelling => return None,
        StepOutcome::Spent => {
            commands.entity(entity).try_despawn();
            return None;
        }
        StepOutcome::Hit(target) => target,
    };

    let position = transform.translation.truncate();
    commands.entity(entity).try_despawn();
    detonate(commands, effects, projectile, position, transform.rotation);
    debug!("Projectile {:?} exploded on {:?}", entity, target);

    if let Ok((Some(tag), target_transform)) = targets.get(target) {
        let mut ctx = ReactionContext {
            commands,
            effects,
            target,
            target_position: target_transform.map_or(position, |t| t.translation().truncate()),
        };
        reactions.dispatch(&tag.0, &mut ctx);
    }

    Some(ProjectileExploded {
        projectile: entity,
        target,
        position,
        damage: projectile.damage,
    })
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<ProjectileTuning>,
    spatial_query: SpatialQuery,
    effects: Res<Effects>,
    reactions: Res<TagReactions>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    targets: TargetQuery,
    mut exploded: MessageWriter<ProjectileExploded>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut transform) in &mut projectiles {
        let filter = SpatialQueryFilter::from_mask(projectile.mask);
        let reach = tuning.probe_length(projectile.speed, dt);
        let explosion = advance_projectile(
            &mut commands,
            &effects,
            &reactions,
            &targets,
            entity,
            &mut projectile,
            &mut transform,
            dt,
            |origin, direction| {
                spatial_query
                    .cast_ray(origin, direction, reach, true, &filter)
                    .map(|hit| hit.entity)
            },
        );
        if let Some(explosion) = explosion {
            exploded.write(explosion);
        }
    }
}

pub(crate) fn apply_explosion_damage(
    mut commands: Commands,
    mut exploded: MessageReader<ProjectileExploded>,
    mut targets: Query<&mut Health>,
) {
    for explosion in exploded.read() {
        let Ok(mut health) = targets.get_mut(explosion.target) else {
            continue;
        };
        if health.take_damage(explosion.damage) {
            info!("Target {:?} destroyed", explosion.target);
            commands.entity(explosion.target).try_despawn();
        }
    }
}
