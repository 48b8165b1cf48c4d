//! Where a player's output goes.
//!
//! The player never reads back what it writes. In an app, output lands
//! on the player entity's [`DialogueText`], [`DialogueTitle`] and
//! [`DialogueBox`] components, which UI code can mirror onto whatever
//! widgets it uses.

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_platform::collections::HashSet;
use bevy_time::{Time, Virtual};

/// Lifecycle notifications emitted by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Started,
    Ended,
}

/// Triggered on the player entity when a dialogue begins,
/// before any line is shown.
#[derive(Debug, Clone, Copy, Event)]
pub struct DialogueStarted;

/// Triggered on the player entity after a dialogue box is hidden.
#[derive(Debug, Clone, Copy, Event)]
pub struct DialogueEnded;

/// The boundary a [`DialoguePlayer`](crate::player::DialoguePlayer) writes to.
pub trait DialogueSurface {
    fn set_text(&mut self, text: &str);

    fn set_title(&mut self, title: &str);

    fn set_visible(&mut self, visible: bool);

    fn pause_simulation(&mut self);

    fn resume_simulation(&mut self);

    fn notify(&mut self, notification: Notification);
}

/// The body text of the line on display.
#[derive(Debug, Default, Clone, PartialEq, Eq, Component)]
pub struct DialogueText(pub String);

/// The title of the line on display.
#[derive(Debug, Default, Clone, PartialEq, Eq, Component)]
pub struct DialogueTitle(pub String);

/// Visibility of the dialogue box container.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Component)]
pub struct DialogueBox {
    pub visible: bool,
}

/// The players currently holding virtual time paused.
///
/// Virtual time is shared, so it's only unpaused once the last
/// holder lets go.
#[derive(Debug, Default, Clone, Resource)]
pub struct SimulationPause {
    holders: HashSet<Entity>,
}

impl SimulationPause {
    pub fn is_held(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn is_held_by(&self, player: Entity) -> bool {
        self.holders.contains(&player)
    }

    pub(crate) fn hold(&mut self, player: Entity) {
        self.holders.insert(player);
    }

    /// Returns whether `player` was the last holder.
    pub(crate) fn release(&mut self, player: Entity) -> bool {
        self.holders.remove(&player) && self.holders.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SurfaceEffect {
    Text(String),
    Title(String),
    Visible(bool),
    Pause,
    Resume,
    Notify(Notification),
}

/// Records surface writes so they can be applied to a [`World`]
/// once the player is no longer borrowed.
///
/// Effects are applied in the order they were written, so
/// observers see notifications exactly where the player sent them.
#[derive(Debug, Default)]
pub struct SurfaceEffects(Vec<SurfaceEffect>);

impl SurfaceEffects {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn apply(self, world: &mut World, player: Entity) {
        for effect in self.0 {
            match effect {
                SurfaceEffect::Text(text) => {
                    if let Some(mut target) = world.get_mut::<DialogueText>(player) {
                        target.0 = text;
                    }
                }
                SurfaceEffect::Title(title) => {
                    if let Some(mut target) = world.get_mut::<DialogueTitle>(player) {
                        target.0 = title;
                    }
                }
                SurfaceEffect::Visible(visible) => {
                    if let Some(mut target) = world.get_mut::<DialogueBox>(player) {
                        target.visible = visible;
                    }
                }
                SurfaceEffect::Pause => {
                    world
                        .get_resource_or_insert_with(SimulationPause::default)
                        .hold(player);

                    match world.get_resource_mut::<Time<Virtual>>() {
                        Some(mut time) => time.pause(),
                        None => warn!("cannot pause virtual time: `Time<Virtual>` is missing"),
                    }
                }
                SurfaceEffect::Resume => {
                    let last = world
                        .get_resource_mut::<SimulationPause>()
                        .is_some_and(|mut pause| pause.release(player));

                    if last {
                        if let Some(mut time) = world.get_resource_mut::<Time<Virtual>>() {
                            time.unpause();
                        }
                    }
                }
                SurfaceEffect::Notify(Notification::Started) => {
                    world.trigger_targets(DialogueStarted, player);
                }
                SurfaceEffect::Notify(Notification::Ended) => {
                    world.trigger_targets(DialogueEnded, player);
                }
            }
        }
    }
}

impl DialogueSurface for SurfaceEffects {
    fn set_text(&mut self, text: &str) {
        // Only the last write of a run matters.
        if let Some(SurfaceEffect::Text(previous)) = self.0.last_mut() {
            previous.clear();
            previous.push_str(text);
        } else {
            self.0.push(SurfaceEffect::Text(text.to_owned()));
        }
    }

    fn set_title(&mut self, title: &str) {
        self.0.push(SurfaceEffect::Title(title.to_owned()));
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.push(SurfaceEffect::Visible(visible));
    }

    fn pause_simulation(&mut self) {
        self.0.push(SurfaceEffect::Pause);
    }

    fn resume_simulation(&mut self) {
        self.0.push(SurfaceEffect::Resume);
    }

    fn notify(&mut self, notification: Notification) {
        self.0.push(SurfaceEffect::Notify(notification));
    }
}
