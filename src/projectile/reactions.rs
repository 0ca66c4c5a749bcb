//! Projectile domain: tag-keyed hit reactions.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::content::{ContentRegistry, TagReactionDef};
use crate::effects::Effects;

/// What a reaction may touch when a tagged target is hit.
pub struct ReactionContext<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub effects: &'a Effects,
    pub target: Entity,
    pub target_position: Vec2,
}

pub trait TagReaction: Send + Sync + 'static {
    fn react(&self, ctx: &mut ReactionContext);
}

/// Spawn an effect and sound at the target and optionally destroy it.
#[derive(Debug, Clone)]
pub struct ExplodeTarget {
    pub effect: Option<String>,
    pub sound: String,
    pub destroy_target: bool,
}

impl ExplodeTarget {
    pub fn from_def(def: &TagReactionDef) -> Self {
        Self {
            effect: def.effect.clone(),
            sound: def.sound.clone(),
            destroy_target: def.destroy_target,
        }
    }
}

impl TagReaction for ExplodeTarget {
    fn react(&self, ctx: &mut ReactionContext) {
        ctx.effects.spawn_effect(
            ctx.commands,
            self.effect.as_deref(),
            ctx.target_position,
            0.0,
        );
        ctx.effects.audio.play(ctx.commands, &self.sound);
        if self.destroy_target {
            ctx.commands.entity(ctx.target).try_despawn();
        }
    }
}

#[derive(Resource, Default, Clone)]
pub struct TagReactions {
    reactions: HashMap<String, Arc<dyn TagReaction>>,
}

impl TagReactions {
    pub fn insert(&mut self, tag: impl Into<String>, reaction: impl TagReaction) {
        self.reactions.insert(tag.into(), Arc::new(reaction));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.reactions.contains_key(tag)
    }

    /// Run the reaction for `tag`. Returns false when none is registered.
    pub fn dispatch(&self, tag: &str, ctx: &mut ReactionContext) -> bool {
        let Some(reaction) = self.reactions.get(tag) else {
            return false;
        };
        reaction.react(ctx);
        true
    }
}

pub trait TagReactionAppExt {
    fn register_tag_reaction(&mut self, tag: &str, reaction: impl TagReaction) -> &mut Self;
}

impl TagReactionAppExt for App {
    fn register_tag_reaction(&mut self, tag: &str, reaction: impl TagReaction) -> &mut Self {
        self.world_mut()
            .get_resource_or_init::<TagReactions>()
            .insert(tag, reaction);
        self
    }
}

/// Register an [`ExplodeTarget`] per data-defined tag. Tags registered from
/// code keep their reaction.
pub(crate) fn register_data_reactions(
    registry: Res<ContentRegistry>,
    mut reactions: ResMut<TagReactions>,
) {
    for (tag, def) in &registry.tag_reactions {
        if reactions.contains(tag) {
            debug!("Tag reaction '{}' already registered from code", tag);
            continue;
        }
        reactions.insert(tag.clone(), ExplodeTarget::from_def(def));
    }
}
