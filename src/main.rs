use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use tank_forge::TankForgePlugin;
use tank_forge::assembly::{
    AccessoryEdit, AccessoryRef, BuildOp, BuildRequest, CannonType, HullClass, spawn_tank,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tank Forge".to_string(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(TankForgePlugin)
        .add_systems(Startup, spawn_demo_tank)
        .run();
}

/// Build a playable tank: turret with a mounted gun, a hull decal and all controllers.
fn spawn_demo_tank(mut commands: Commands, mut requests: MessageWriter<BuildRequest>) {
    let tank = spawn_tank(&mut commands, "Player Tank", Vec2::ZERO, HullClass::Medium);

    let ops = [
        BuildOp::SpawnHull,
        BuildOp::SpawnCannon(CannonType::Single),
        BuildOp::AddCategory {
            name: "Turret".to_string(),
            folder: "Turret".to_string(),
        },
        BuildOp::AddCategory {
            name: "Decals".to_string(),
            folder: "Decals".to_string(),
        },
        BuildOp::SpawnAccessory(0),
        BuildOp::EditAccessory {
            accessory: AccessoryRef::new(0, 0),
            edit: AccessoryEdit::Position(Vec2::new(10.0, 4.0)),
        },
        BuildOp::MakeWeaponMount(AccessoryRef::new(0, 0)),
        BuildOp::SpawnAccessory(1),
        BuildOp::EditAccessory {
            accessory: AccessoryRef::new(1, 0),
            edit: AccessoryEdit::Position(Vec2::new(0.0, -24.0)),
        },
        BuildOp::AddMovementSystem,
        BuildOp::AddWeaponSystem {
            loadout: [
                Some("weapon_cannon_basic".to_string()),
                Some("weapon_cannon_heavy".to_string()),
                Some("weapon_mount_mg".to_string()),
            ],
        },
        BuildOp::AddCameraSystem,
    ];

    for op in ops {
        requests.write(BuildRequest::new(tank, op));
    }
}
