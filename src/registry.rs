//! Looking up players by role.
//!
//! A player configured with `is_singleton` registers itself under
//! [`DEFAULT_ROLE`] when it's added to the world. Other roles can be
//! registered by hand, and the registry can be replaced wholesale
//! in tests.

use crate::{
    error::{DialogueError, DialogueResult},
    player::DialoguePlayer,
    surface::SimulationPause,
};
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_platform::collections::HashMap;
use bevy_time::{Time, Virtual};
use std::borrow::Cow;

/// The role of the player designated as the process-wide default.
pub const DEFAULT_ROLE: &str = "default";

#[derive(Debug, Default, Clone, Resource)]
pub struct DialogueRegistry {
    roles: HashMap<Cow<'static, str>, Entity>,
}

impl DialogueRegistry {
    /// Register `player` under `role`, returning the player it replaced.
    pub fn register(
        &mut self,
        role: impl Into<Cow<'static, str>>,
        player: Entity,
    ) -> Option<Entity> {
        self.roles.insert(role.into(), player)
    }

    pub fn unregister(&mut self, role: &str) -> Option<Entity> {
        self.roles.remove(role)
    }

    /// Drop every role held by `player`.
    pub fn release(&mut self, player: Entity) {
        self.roles.retain(|_, entity| *entity != player);
    }

    pub fn get(&self, role: &str) -> Option<Entity> {
        self.roles.get(role).copied()
    }

    pub fn require(&self, role: &str) -> DialogueResult<Entity> {
        self.get(role)
            .ok_or_else(|| DialogueError::UnknownRole(role.to_owned()))
    }

    pub fn default_player(&self) -> Option<Entity> {
        self.get(DEFAULT_ROLE)
    }
}

/// Identifies the player a dialogue command is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DialogueTarget {
    Entity(Entity),
    Role(Cow<'static, str>),
}

impl DialogueTarget {
    /// The player registered under [`DEFAULT_ROLE`].
    pub fn default_player() -> Self {
        Self::Role(Cow::Borrowed(DEFAULT_ROLE))
    }
}

impl From<Entity> for DialogueTarget {
    fn from(entity: Entity) -> Self {
        Self::Entity(entity)
    }
}

impl From<&'static str> for DialogueTarget {
    fn from(role: &'static str) -> Self {
        Self::Role(Cow::Borrowed(role))
    }
}

impl From<String> for DialogueTarget {
    fn from(role: String) -> Self {
        Self::Role(Cow::Owned(role))
    }
}

pub(crate) fn register_singleton(
    trigger: Trigger<OnAdd, DialoguePlayer>,
    players: Query<&DialoguePlayer>,
    mut registry: ResMut<DialogueRegistry>,
    mut commands: Commands,
) {
    let entity = trigger.target();
    let Ok(player) = players.get(entity) else {
        return;
    };

    if !player.config().is_singleton {
        return;
    }

    match registry.default_player() {
        None => {
            debug!("registering {entity} as the default dialogue player");
            registry.register(DEFAULT_ROLE, entity);
        }
        Some(existing) if existing == entity => {}
        Some(existing) => {
            warn!(
                "{entity} is configured as a singleton dialogue player, but {existing} already is; removing its player"
            );
            commands.entity(entity).remove::<DialoguePlayer>();
        }
    }
}

pub(crate) fn release_player(
    trigger: Trigger<OnRemove, DialoguePlayer>,
    mut registry: ResMut<DialogueRegistry>,
    pause: Option<ResMut<SimulationPause>>,
    time: Option<ResMut<Time<Virtual>>>,
) {
    let entity = trigger.target();
    registry.release(entity);

    // A player removed mid-dialogue must not leave the simulation paused.
    let last = pause.is_some_and(|mut pause| pause.release(entity));
    if let (true, Some(mut time)) = (last, time) {
        time.unpause();
    }
}
