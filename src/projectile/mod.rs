//! Projectile domain: ammo travel, collision probing, explosions and reactions.

mod components;
mod events;
mod reactions;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    Health, Projectile, ProjectileState, ProjectileTuning, StepOutcome, TargetTag,
};
pub use events::ProjectileExploded;
pub use reactions::{ExplodeTarget, ReactionContext, TagReaction, TagReactionAppExt, TagReactions};

use bevy::prelude::*;

use crate::content::load_content;
use crate::core::SimSet;

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectileTuning>()
            .init_resource::<TagReactions>()
            .add_message::<ProjectileExploded>()
            .add_systems(
                Startup,
                reactions::register_data_reactions.after(load_content),
            )
            .add_systems(
                FixedUpdate,
                (systems::move_projectiles, systems::apply_explosion_damage)
                    .chain()
                    .in_set(SimSet::Travel),
            );
    }
}
