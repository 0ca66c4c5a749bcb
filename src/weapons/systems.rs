//! Weapons domain: fixed-tick firing.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;

use super::controller::WeaponController;
use super::events::ShotFired;
use crate::controls::ControlInput;
use crate::core::flat_angle;
use crate::effects::Effects;
use crate::projectile::Projectile;

pub(crate) fn fire_weapons(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<ControlInput>,
    effects: Res<Effects>,
    mut controllers: Query<(Entity, &mut WeaponController)>,
    transform_helper: TransformHelper,
    mut shots: MessageWriter<ShotFired>,
) {
    let dt = time.delta_secs();

    for (tank, mut controller) in &mut controllers {
        for order in controller.tick(dt, &input) {
            let Ok(muzzle) = transform_helper.compute_global_transform(order.fire_point) else {
                warn!(
                    "Tank {:?}: fire point {:?} for slot {} is gone",
                    tank, order.fire_point, order.slot
                );
                continue;
            };
            let position = muzzle.translation().truncate();
            let rotation = flat_angle(muzzle.rotation());

            let Some(projectile) =
                effects
                    .assets
                    .spawn(&mut commands, &order.weapon.projectile_asset, position, rotation)
            else {
                continue;
            };
            commands
                .entity(projectile)
                .insert(Projectile::from_weapon(&order.weapon));

            effects.audio.play(&mut commands, &order.weapon.shot_sound);
            effects.spawn_effect(
                &mut commands,
                order.weapon.muzzle_flash.as_deref(),
                position,
                rotation,
            );

            debug!(
                "Tank {:?}: slot {} fired {}",
                tank, order.slot, order.weapon.id
            );
            shots.write(ShotFired {
                tank,
                slot: order.slot,
                projectile,
            });
        }
    }
}
