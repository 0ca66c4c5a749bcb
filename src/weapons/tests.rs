//! Weapons domain: clamping, cooldowns and slot routing.

use bevy::ecs::message::{MessageReader, Messages};
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::systems::fire_weapons;
use super::*;
use crate::assembly::FieldBinding;
use crate::content::WeaponDef;
use crate::controls::ControlInput;
use crate::controls::bindings::{FIRE_1, FIRE_2, FIRE_3};
use crate::core::GameLayer;
use crate::effects::testing::recording_effects;
use crate::projectile::Projectile;

const TICK: f32 = 0.01;

fn shell(cooldown: f32) -> WeaponDefinition {
    let mut weapon = WeaponDefinition::new("weapon_shell", "shell_basic");
    weapon.set_speed(400.0);
    weapon.set_damage(25.0);
    weapon.set_cooldown(cooldown);
    weapon
}

fn fire_points(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

fn held(binding: &str) -> ControlInput {
    let mut input = ControlInput::default();
    input.set_axis(binding, 1.0);
    input
}

#[test]
fn test_numeric_setters_clamp_to_floor() {
    let mut weapon = WeaponDefinition::new("w", "p");

    assert!(weapon.set_speed(5.0));
    assert_eq!(weapon.speed(), MIN_SPEED);
    weapon.set_damage(-3.0);
    assert_eq!(weapon.damage(), 0.0);
    weapon.set_cooldown(-1.0);
    assert_eq!(weapon.cooldown().reset_value(), 0.0);
    weapon.set_cooldown_remaining(-1.0);
    assert_eq!(weapon.cooldown().remaining(), 0.0);

    assert!(weapon.set_speed(120.5));
    assert_eq!(weapon.speed(), 120.5);
}

#[test]
fn test_same_value_reports_unchanged() {
    let mut weapon = shell(0.8);
    assert!(!weapon.set_speed(400.0));
    assert!(!weapon.set_cooldown(0.8));
    // Clamped to the same floor twice
    assert!(weapon.set_speed(1.0));
    assert!(!weapon.set_speed(2.0));
}

#[test]
fn test_cooldown_counts_down_to_zero() {
    let mut cooldown = Cooldown::new(0.3);
    assert!(cooldown.is_ready());

    cooldown.restart();
    assert!(!cooldown.is_ready());
    cooldown.tick(0.2);
    assert!((cooldown.remaining() - 0.1).abs() < 1e-6);
    cooldown.tick(0.5);
    assert_eq!(cooldown.remaining(), 0.0);
    assert!(cooldown.is_ready());
}

#[test]
fn test_definition_from_content() {
    let def = WeaponDef {
        id: "weapon_cannon_basic".to_string(),
        name: "Basic Shell".to_string(),
        speed: 10.0,
        damage: 25.0,
        cooldown: 0.8,
        collision_mask: vec![GameLayer::Target],
        projectile_asset: "shell_basic".to_string(),
        shot_sound: "shot_basic".to_string(),
        explosion_sound: "None".to_string(),
        muzzle_flash: Some("muzzle_flash".to_string()),
        explosion_effect: None,
    };

    let weapon = WeaponDefinition::from_def(&def);
    assert_eq!(weapon.speed(), MIN_SPEED);
    assert_eq!(weapon.cooldown().reset_value(), 0.8);
    assert_eq!(weapon.collision_mask, crate::core::layer_mask(&[GameLayer::Target]));
    assert_eq!(weapon.muzzle_flash.as_deref(), Some("muzzle_flash"));
}

#[test]
fn test_field_binding_uses_setters() {
    let mut weapon = shell(0.8);
    assert_eq!(weapon.get_field("cooldown"), Some(0.8));
    assert!(weapon.set_field("speed", 0.0));
    assert_eq!(weapon.get_field("speed"), Some(MIN_SPEED));
    assert!(!weapon.set_field("unknown", 1.0));
    assert_eq!(weapon.get_field("unknown"), None);
}

#[test]
fn test_slot_fire_point_mapping() {
    let one = fire_points(1);
    for slot in 0..SLOT_COUNT {
        assert_eq!(fire_point_for_slot(slot, &one), Some(one[0]));
    }

    let two = fire_points(2);
    assert_eq!(fire_point_for_slot(0, &two), Some(two[0]));
    assert_eq!(fire_point_for_slot(1, &two), Some(two[0]));
    assert_eq!(fire_point_for_slot(2, &two), Some(two[1]));

    let four = fire_points(4);
    for slot in 0..SLOT_COUNT {
        assert_eq!(fire_point_for_slot(slot, &four), Some(four[slot]));
    }

    assert_eq!(fire_point_for_slot(0, &[]), None);
}

#[test]
fn test_empty_slot_never_fires() {
    let mut controller = WeaponController::new([None, None, None], &fire_points(1), &[]);
    let mut input = held(FIRE_1);
    input.press(FIRE_1);

    assert!(controller.tick(TICK, &input).is_empty());
    assert!(!controller.slots()[0].firing);
}

#[test]
fn test_slot_without_fire_point_never_fires() {
    let mut controller = WeaponController::new([Some(shell(0.1)), None, None], &[], &[]);
    assert!(controller.tick(TICK, &held(FIRE_1)).is_empty());
}

#[test]
fn test_cooldown_gates_held_input() {
    let mut controller = WeaponController::new([Some(shell(0.8)), None, None], &fire_points(1), &[]);
    let input = held(FIRE_1);

    assert_eq!(controller.tick(TICK, &input).len(), 1);

    // 0.79 s of held input
    for _ in 0..79 {
        assert!(controller.tick(TICK, &input).is_empty());
    }

    // 0.80 s elapsed
    let orders = controller.tick(TICK, &input);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].slot, 0);
}

#[test]
fn test_press_edge_fires_once() {
    let points = fire_points(1);
    let mut controller = WeaponController::new([Some(shell(0.0)), None, None], &points, &[]);

    let mut input = ControlInput::default();
    input.press(FIRE_1);
    let orders = controller.tick(TICK, &input);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].fire_point, points[0]);

    input.clear_edges();
    assert!(controller.tick(TICK, &input).is_empty());
}

#[test]
fn test_input_below_threshold_is_ignored() {
    let mut controller = WeaponController::new([Some(shell(0.0)), None, None], &fire_points(1), &[]);
    let mut input = ControlInput::default();
    input.set_axis(FIRE_1, AXIS_FIRE_THRESHOLD);
    assert!(controller.tick(TICK, &input).is_empty());
}

#[test]
fn test_slots_fire_independently_in_order() {
    let points = fire_points(2);
    let mut controller = WeaponController::new(
        [Some(shell(1.0)), Some(shell(1.0)), Some(shell(1.0))],
        &points,
        &[],
    );
    let mut input = ControlInput::default();
    for binding in [FIRE_3, FIRE_1, FIRE_2] {
        input.press(binding);
    }

    let orders = controller.tick(TICK, &input);
    let slots: Vec<usize> = orders.iter().map(|order| order.slot).collect();
    assert_eq!(slots, vec![0, 1, 2]);
    assert_eq!(orders[2].fire_point, points[1]);

    // Re-arming slot 0 leaves the others cooling down
    controller.slot_mut(0).unwrap().weapon = Some(shell(0.0));
    let orders = controller.tick(TICK, &input);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].slot, 0);
}

#[test]
fn test_fire_order_snapshots_weapon() {
    let mut controller = WeaponController::new([Some(shell(0.5)), None, None], &fire_points(1), &[]);
    let orders = controller.tick(TICK, &held(FIRE_1));
    assert_eq!(orders[0].weapon.damage(), 25.0);
    assert_eq!(orders[0].weapon.id, "weapon_shell");
}

#[test]
fn test_mounts_echo_the_third_slot() {
    let points = fire_points(4);
    let (cannon, mounts) = points.split_at(2);
    let mut controller = WeaponController::new(
        [Some(shell(1.0)), Some(shell(1.0)), Some(shell(1.0))],
        cannon,
        mounts,
    );
    let mut input = ControlInput::default();
    input.press(FIRE_2);
    let orders = controller.tick(TICK, &input);
    // Slot 1 stays on the left cannon and mounts stay quiet
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].fire_point, cannon[0]);
    assert_eq!(orders[0].mount, None);

    input.clear_edges();
    input.press(FIRE_3);
    let orders = controller.tick(TICK, &input);
    let routed: Vec<(Entity, Option<usize>)> =
        orders.iter().map(|order| (order.fire_point, order.mount)).collect();
    assert_eq!(
        routed,
        vec![(cannon[1], None), (mounts[0], Some(0)), (mounts[1], Some(1))]
    );
    assert!(orders.iter().all(|order| order.slot == MOUNT_SLOT));
}

#[test]
fn test_rewire_keeps_slots_on_cannon() {
    let points = fire_points(3);
    let mut controller = WeaponController::new([None, None, None], &points[..1], &[]);
    controller.rewire(&points[..2], &points[2..]);

    assert_eq!(controller.slots()[1].fire_point, Some(points[0]));
    assert_eq!(controller.slots()[2].fire_point, Some(points[1]));
    assert_eq!(controller.mounts(), &points[2..]);
}

fn collect_shots(mut shots: MessageReader<ShotFired>) -> Vec<(Entity, usize, Entity)> {
    shots
        .read()
        .map(|shot| (shot.tank, shot.slot, shot.projectile))
        .collect()
}

#[test]
fn test_fire_weapons_spawns_from_cannon_and_mount() {
    let (effects, log) = recording_effects(&["shell_basic", "muzzle_flash"]);
    let mut world = World::new();
    world.insert_resource(effects);
    world.insert_resource(Time::<()>::default());
    world.init_resource::<Messages<ShotFired>>();
    let mut input = ControlInput::default();
    input.press(FIRE_3);
    world.insert_resource(input);

    let tank = world.spawn(Transform::from_xyz(100.0, 0.0, 0.0)).id();
    let muzzle = world
        .spawn((Transform::from_xyz(0.0, 20.0, 0.0), ChildOf(tank)))
        .id();
    let mount = world
        .spawn((Transform::from_xyz(-8.0, 0.0, 0.0), ChildOf(tank)))
        .id();
    let mut weapon = shell(0.5);
    weapon.shot_sound = "shot_basic".to_string();
    weapon.muzzle_flash = Some("muzzle_flash".to_string());
    world
        .entity_mut(tank)
        .insert(WeaponController::new([None, None, Some(weapon)], &[muzzle], &[mount]));

    world.run_system_once(fire_weapons).unwrap();

    let shots = world.run_system_once(collect_shots).unwrap();
    assert_eq!(shots.len(), 2);
    assert!(shots.iter().all(|&(from, slot, _)| from == tank && slot == MOUNT_SLOT));
    for &(_, _, projectile) in &shots {
        let projectile = world.get::<Projectile>(projectile).unwrap();
        assert_eq!(projectile.damage, 25.0);
        assert_eq!(projectile.speed, 400.0);
        assert!(projectile.is_active());
    }

    let log = log.lock().unwrap();
    let spawned: Vec<(&str, Vec2)> = log
        .spawned
        .iter()
        .map(|(id, position, _)| (id.as_str(), *position))
        .collect();
    assert_eq!(
        spawned,
        vec![
            ("shell_basic", Vec2::new(100.0, 20.0)),
            ("muzzle_flash", Vec2::new(100.0, 20.0)),
            ("shell_basic", Vec2::new(92.0, 0.0)),
            ("muzzle_flash", Vec2::new(92.0, 0.0)),
        ]
    );
    assert_eq!(log.played, vec!["shot_basic".to_string(), "shot_basic".to_string()]);

    let controller = world.get::<WeaponController>(tank).unwrap();
    assert!(!controller.slots()[MOUNT_SLOT].weapon.as_ref().unwrap().cooldown().is_ready());
}

#[test]
fn test_fire_weapons_skips_missing_fire_point() {
    let (effects, log) = recording_effects(&["shell_basic"]);
    let mut world = World::new();
    world.insert_resource(effects);
    world.insert_resource(Time::<()>::default());
    world.init_resource::<Messages<ShotFired>>();
    world.insert_resource(held(FIRE_1));

    let gone = world.spawn_empty().id();
    world.despawn(gone);
    world.spawn(WeaponController::new([Some(shell(0.5)), None, None], &[gone], &[]));

    world.run_system_once(fire_weapons).unwrap();

    assert!(world.run_system_once(collect_shots).unwrap().is_empty());
    assert!(log.lock().unwrap().spawned.is_empty());
}
