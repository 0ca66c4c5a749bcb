//! Projectile domain: travel, single explosion, reactions and damage.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use super::systems::{TargetQuery, advance_projectile, detonate};
use super::*;
use crate::effects::{Effects, Lifetime, expire_lifetimes};
use crate::effects::testing::{SharedLog, recording_effects};
use crate::weapons::WeaponDefinition;

const DT: f32 = 1.0 / 60.0;

fn projectile(speed: f32) -> Projectile {
    let mut weapon = WeaponDefinition::new("weapon_test", "shell_basic");
    weapon.set_speed(speed);
    weapon.set_damage(30.0);
    weapon.explosion_sound = "explosion_small".to_string();
    weapon.explosion_effect = Some("explosion_small".to_string());
    Projectile::from_weapon(&weapon)
}

#[test]
fn test_projectile_copies_weapon_values() {
    let shot = projectile(40.0);
    assert_eq!(shot.speed, 40.0);
    assert_eq!(shot.damage, 30.0);
    assert_eq!(shot.state, ProjectileState::Active);
}

#[test]
fn test_advances_speed_times_dt_per_tick() {
    let mut shot = projectile(40.0);
    let mut transform = Transform::default();

    for tick in 1..=10 {
        let outcome = shot.step(&mut transform, DT, |_, _| None);
        assert_eq!(outcome, StepOutcome::Travelling);
        let expected = 40.0 * DT * tick as f32;
        assert!((transform.translation.y - expected).abs() < 1e-4);
        assert!(transform.translation.x.abs() < 1e-6);
    }
}

#[test]
fn test_travels_along_rotated_forward() {
    let mut shot = projectile(60.0);
    let mut transform = Transform::from_rotation(Quat::from_rotation_z(-FRAC_PI_2));

    shot.step(&mut transform, 0.5, |_, _| None);
    assert!((transform.translation.x - 30.0).abs() < 1e-4);
    assert!(transform.translation.y.abs() < 1e-4);
}

#[test]
fn test_ray_sweeps_from_previous_position() {
    let mut shot = projectile(40.0);
    let mut transform = Transform::default();
    let mut seen = None;

    shot.step(&mut transform, 0.25, |origin, direction| {
        seen = Some((origin, direction));
        None
    });

    let (origin, direction) = seen.unwrap();
    assert!(origin.length() < 1e-5);
    assert!((direction.as_vec2() - Vec2::Y).length() < 1e-5);
    assert!((transform.translation.y - 10.0).abs() < 1e-5);
}

#[test]
fn test_ray_length_covers_a_full_tick() {
    let tuning = ProjectileTuning::default();
    // A fast shot travels further per tick than the look-ahead alone
    let travelled = 640.0 * DT;
    assert!(travelled > tuning.probe_range);
    assert!((tuning.probe_length(640.0, DT) - (travelled + tuning.probe_range)).abs() < 1e-4);
    assert_eq!(tuning.probe_length(640.0, 0.0), tuning.probe_range);
}

#[test]
fn test_explodes_exactly_once() {
    let mut world = World::new();
    let target = world.spawn_empty().id();
    let mut shot = projectile(40.0);
    let mut transform = Transform::default();

    let mut hits = 0;
    for tick in 0..10 {
        let outcome = shot.step(&mut transform, DT, |_, _| (tick >= 3).then_some(target));
        match outcome {
            StepOutcome::Hit(entity) => {
                assert_eq!(entity, target);
                hits += 1;
            }
            StepOutcome::Spent => assert!(tick > 3),
            StepOutcome::Travelling => assert!(tick < 3),
        }
    }

    assert_eq!(hits, 1);
    assert_eq!(shot.state, ProjectileState::Exploded);
}

#[test]
fn test_spent_projectile_does_not_move() {
    let mut shot = projectile(40.0);
    shot.state = ProjectileState::Exploded;
    let mut transform = Transform::default();

    assert_eq!(shot.step(&mut transform, DT, |_, _| None), StepOutcome::Spent);
    assert_eq!(transform.translation, Vec3::ZERO);
}

#[test]
fn test_detonation_lies_flat() {
    let mut world = World::new();
    let (effects, log) = recording_effects(&["explosion_small"]);
    let shot = projectile(40.0);
    let rotation = Quat::from_rotation_z(0.7) * Quat::from_rotation_x(0.4);

    {
        let mut commands = world.commands();
        detonate(&mut commands, &effects, &shot, Vec2::new(5.0, 6.0), rotation);
    }
    world.flush();

    let log = log.lock().unwrap();
    assert_eq!(log.spawned.len(), 1);
    let (id, position, angle) = &log.spawned[0];
    assert_eq!(id, "explosion_small");
    assert_eq!(*position, Vec2::new(5.0, 6.0));
    assert!((angle - 0.7).abs() < 1e-4);
    assert_eq!(log.played, vec!["explosion_small".to_string()]);
}

#[test]
fn test_mine_reaction_destroys_target() {
    let mut world = World::new();
    let (effects, log) = recording_effects(&["explosion_large"]);
    let mine = world.spawn(TargetTag("Mine".to_string())).id();

    let mut reactions = TagReactions::default();
    reactions.insert(
        "Mine",
        ExplodeTarget {
            effect: Some("explosion_large".to_string()),
            sound: "mine_blast".to_string(),
            destroy_target: true,
        },
    );

    {
        let mut commands = world.commands();
        let mut ctx = ReactionContext {
            commands: &mut commands,
            effects: &effects,
            target: mine,
            target_position: Vec2::new(-3.0, 8.0),
        };
        assert!(reactions.dispatch("Mine", &mut ctx));
        assert!(!reactions.dispatch("Crate", &mut ctx));
    }
    world.flush();

    assert!(world.get_entity(mine).is_err());
    let log = log.lock().unwrap();
    assert_eq!(log.spawned[0].1, Vec2::new(-3.0, 8.0));
    assert_eq!(log.played, vec!["mine_blast".to_string()]);
}

struct CountHits(std::sync::Arc<std::sync::atomic::AtomicUsize>);

impl TagReaction for CountHits {
    fn react(&self, _ctx: &mut ReactionContext) {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[test]
fn test_register_tag_reaction_on_app() {
    let counter = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut app = App::new();
    app.register_tag_reaction("Beacon", CountHits(counter.clone()));

    let reactions = app.world().resource::<TagReactions>().clone();
    assert!(reactions.contains("Beacon"));

    let (effects, _) = recording_effects(&[]);
    let mut world = World::new();
    let target = world.spawn_empty().id();
    {
        let mut commands = world.commands();
        let mut ctx = ReactionContext {
            commands: &mut commands,
            effects: &effects,
            target,
            target_position: Vec2::ZERO,
        };
        reactions.dispatch("Beacon", &mut ctx);
    }
    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_health_depletes_and_floors() {
    let mut health = Health::new(50.0);
    assert!(!health.take_damage(30.0));
    assert_eq!(health.current, 20.0);
    assert!(!health.take_damage(-10.0));
    assert_eq!(health.current, 20.0);
    assert!(health.take_damage(25.0));
    assert_eq!(health.current, 0.0);
}

/// Whatever the next ray reports as hit.
#[derive(Resource)]
struct RayHits(Option<Entity>);

fn advance_all(
    mut commands: Commands,
    effects: Res<Effects>,
    reactions: Res<TagReactions>,
    hits: Res<RayHits>,
    targets: TargetQuery,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
) -> Vec<ProjectileExploded> {
    let mut explosions = Vec::new();
    for (entity, mut projectile, mut transform) in &mut projectiles {
        explosions.extend(advance_projectile(
            &mut commands,
            &effects,
            &reactions,
            &targets,
            entity,
            &mut projectile,
            &mut transform,
            DT,
            |_, _| hits.0,
        ));
    }
    explosions
}

fn range_world(known_assets: &[&str]) -> (World, SharedLog) {
    let (effects, log) = recording_effects(known_assets);
    let mut reactions = TagReactions::default();
    reactions.insert(
        "Mine",
        ExplodeTarget {
            effect: Some("explosion_large".to_string()),
            sound: "mine_blast".to_string(),
            destroy_target: true,
        },
    );
    let mut world = World::new();
    world.insert_resource(effects);
    world.insert_resource(reactions);
    world.insert_resource(RayHits(None));
    (world, log)
}

#[test]
fn test_hit_detonates_reacts_and_despawns_once() {
    let (mut world, log) = range_world(&["explosion_small", "explosion_large"]);
    let mine = world
        .spawn((
            TargetTag("Mine".to_string()),
            GlobalTransform::from_translation(Vec3::new(0.0, 4.0, 0.0)),
        ))
        .id();
    let shot = world.spawn((projectile(40.0), Transform::default())).id();

    // Nothing in the way yet
    let explosions = world.run_system_once(advance_all).unwrap();
    assert!(explosions.is_empty());
    assert!(world.get_entity(shot).is_ok());

    world.resource_mut::<RayHits>().0 = Some(mine);
    let explosions = world.run_system_once(advance_all).unwrap();
    assert_eq!(explosions.len(), 1);
    assert_eq!(explosions[0].projectile, shot);
    assert_eq!(explosions[0].target, mine);
    assert_eq!(explosions[0].damage, 30.0);
    assert!((explosions[0].position.y - 80.0 * DT).abs() < 1e-4);
    assert!(world.get_entity(shot).is_err());
    assert!(world.get_entity(mine).is_err());

    // The shot is gone; a later tick finds nothing to explode
    let explosions = world.run_system_once(advance_all).unwrap();
    assert!(explosions.is_empty());

    let log = log.lock().unwrap();
    let spawned: Vec<&str> = log.spawned.iter().map(|(id, _, _)| id.as_str()).collect();
    assert_eq!(spawned, vec!["explosion_small", "explosion_large"]);
    assert_eq!(log.spawned[1].1, Vec2::new(0.0, 4.0));
    assert_eq!(log.played, vec!["explosion_small".to_string(), "mine_blast".to_string()]);
}

#[test]
fn test_exploded_projectile_never_detonates_again() {
    let (mut world, log) = range_world(&["explosion_small"]);
    let crate_target = world.spawn(TargetTag("Crate".to_string())).id();
    let mut spent = projectile(40.0);
    spent.state = ProjectileState::Exploded;
    let shot = world.spawn((spent, Transform::default())).id();
    world.resource_mut::<RayHits>().0 = Some(crate_target);

    let explosions = world.run_system_once(advance_all).unwrap();

    assert!(explosions.is_empty());
    assert!(world.get_entity(shot).is_err());
    assert!(world.get_entity(crate_target).is_ok());
    assert!(log.lock().unwrap().spawned.is_empty());
}

#[test]
fn test_untagged_target_only_gets_the_explosion() {
    let (mut world, log) = range_world(&["explosion_small"]);
    let wall = world.spawn_empty().id();
    world.spawn((projectile(40.0), Transform::default()));
    world.resource_mut::<RayHits>().0 = Some(wall);

    let explosions = world.run_system_once(advance_all).unwrap();

    assert_eq!(explosions.len(), 1);
    assert!(world.get_entity(wall).is_ok());
    assert_eq!(log.lock().unwrap().played, vec!["explosion_small".to_string()]);
}

#[test]
fn test_expired_projectile_skips_travel_in_same_tick() {
    let (mut world, log) = range_world(&["explosion_small"]);
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(20));
    world.insert_resource(time);
    let wall = world.spawn_empty().id();
    let shot = world
        .spawn((projectile(40.0), Transform::default(), Lifetime(0.01)))
        .id();
    world.resource_mut::<RayHits>().0 = Some(wall);

    // Both systems queue a despawn before any command is applied
    let mut schedule = Schedule::default();
    schedule.add_systems((expire_lifetimes, advance_all.map(drop)).chain_ignore_deferred());
    schedule.run(&mut world);

    assert!(world.get_entity(shot).is_err());
    assert!(world.get_entity(wall).is_ok());
    assert!(log.lock().unwrap().spawned.is_empty());
}
