use crate::{
    player::DialoguePlayer,
    registry,
    surface::{SimulationPause, SurfaceEffects},
};
use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_time::{Real, Time};

/// `bevy_dialogue_box`'s plugin.
///
/// Requires `Time<Real>` and `Time<Virtual>`, which bevy's `TimePlugin` provides.
pub struct DialoguePlugin;

/// Sets for every `bevy_dialogue_box` system.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DialogueSets {
    /// Advance typing effects and auto-skip timers.
    Tick,
}

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<registry::DialogueRegistry>()
            .init_resource::<SimulationPause>()
            .add_systems(Update, tick_players.in_set(DialogueSets::Tick))
            .add_observer(registry::register_singleton)
            .add_observer(registry::release_player);

        #[cfg(feature = "reflect")]
        app.register_type::<crate::script::Line>()
            .register_type::<crate::script::DialogueScript>()
            .register_type::<crate::config::DialogueConfig>();
    }
}

/// Tick every running player once per frame.
///
/// Both the typing effect and the auto-skip timer ignore virtual time,
/// so they keep going while a dialogue pauses the simulation.
pub(crate) fn tick_players(
    world: &mut World,
    players: &mut QueryState<(Entity, &mut DialoguePlayer)>,
) {
    let delta = world
        .get_resource::<Time<Real>>()
        .map(|time| time.delta())
        .unwrap_or_default();

    let mut updates = Vec::new();
    for (entity, mut player) in players.iter_mut(world) {
        if !player.is_active() {
            continue;
        }

        let mut effects = SurfaceEffects::default();
        player.tick(delta, &mut effects);

        if !effects.is_empty() {
            updates.push((entity, effects));
        }
    }

    for (entity, effects) in updates {
        effects.apply(world, entity);
    }
}
