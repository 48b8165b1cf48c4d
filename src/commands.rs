//! Driving players through the [`World`] and [`Commands`].
//!
//! [`DialogueWorldExt`] runs immediately and reports errors. Observers of
//! [`DialogueStarted`](crate::surface::DialogueStarted) and
//! [`DialogueEnded`](crate::surface::DialogueEnded) have all run by the
//! time it returns. [`DialogueCommandsExt`] queues the same operations
//! and logs any errors.

use crate::{
    error::{DialogueError, DialogueResult},
    player::DialoguePlayer,
    registry::{DialogueRegistry, DialogueTarget},
    script::IntoDialogueScript,
    surface::SurfaceEffects,
};
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;

pub trait DialogueWorldExt {
    /// Find the player entity a target refers to.
    fn resolve_dialogue(&self, target: impl Into<DialogueTarget>) -> DialogueResult<Entity>;

    fn start_dialogue(
        &mut self,
        target: impl Into<DialogueTarget>,
        script: impl IntoDialogueScript,
    ) -> DialogueResult<()>;

    /// Replay the script already attached to the player.
    fn start_attached_dialogue(&mut self, target: impl Into<DialogueTarget>) -> DialogueResult<()>;

    fn skip_dialogue(&mut self, target: impl Into<DialogueTarget>) -> DialogueResult<()>;

    fn end_dialogue(&mut self, target: impl Into<DialogueTarget>) -> DialogueResult<()>;
}

fn drive<T>(
    world: &mut World,
    target: DialogueTarget,
    operation: impl FnOnce(&mut DialoguePlayer, &mut SurfaceEffects) -> DialogueResult<T>,
) -> DialogueResult<T> {
    let entity = world.resolve_dialogue(target)?;
    let mut effects = SurfaceEffects::default();

    let result = {
        let mut player = world
            .get_mut::<DialoguePlayer>(entity)
            .ok_or(DialogueError::NoPlayer(entity))?;
        operation(&mut *player, &mut effects)
    };

    effects.apply(world, entity);
    result
}

impl DialogueWorldExt for World {
    fn resolve_dialogue(&self, target: impl Into<DialogueTarget>) -> DialogueResult<Entity> {
        match target.into() {
            DialogueTarget::Entity(entity) => Ok(entity),
            DialogueTarget::Role(role) => match self.get_resource::<DialogueRegistry>() {
                Some(registry) => registry.require(&role),
                None => Err(DialogueError::UnknownRole(role.into_owned())),
            },
        }
    }

    fn start_dialogue(
        &mut self,
        target: impl Into<DialogueTarget>,
        script: impl IntoDialogueScript,
    ) -> DialogueResult<()> {
        let script = script.into_script();
        drive(self, target.into(), |player, effects| {
            player.start(script, effects);
            Ok(())
        })
    }

    fn start_attached_dialogue(&mut self, target: impl Into<DialogueTarget>) -> DialogueResult<()> {
        drive(self, target.into(), |player, effects| {
            player.start_attached(effects)
        })
    }

    fn skip_dialogue(&mut self, target: impl Into<DialogueTarget>) -> DialogueResult<()> {
        drive(self, target.into(), |player, effects| {
            player.skip(effects);
            Ok(())
        })
    }

    fn end_dialogue(&mut self, target: impl Into<DialogueTarget>) -> DialogueResult<()> {
        drive(self, target.into(), |player, effects| {
            player.end(effects);
            Ok(())
        })
    }
}

pub trait DialogueCommandsExt {
    fn start_dialogue(
        &mut self,
        target: impl Into<DialogueTarget>,
        script: impl IntoDialogueScript,
    );

    fn start_attached_dialogue(&mut self, target: impl Into<DialogueTarget>);

    fn skip_dialogue(&mut self, target: impl Into<DialogueTarget>);

    fn end_dialogue(&mut self, target: impl Into<DialogueTarget>);
}

impl<'w, 's> DialogueCommandsExt for Commands<'w, 's> {
    fn start_dialogue(
        &mut self,
        target: impl Into<DialogueTarget>,
        script: impl IntoDialogueScript,
    ) {
        let target = target.into();
        let script = script.into_script();

        self.queue(move |world: &mut World| {
            if let Err(e) = world.start_dialogue(target, script) {
                error!("failed to start dialogue: {e}");
            }
        });
    }

    fn start_attached_dialogue(&mut self, target: impl Into<DialogueTarget>) {
        let target = target.into();

        self.queue(move |world: &mut World| {
            if let Err(e) = world.start_attached_dialogue(target) {
                error!("failed to start dialogue: {e}");
            }
        });
    }

    fn skip_dialogue(&mut self, target: impl Into<DialogueTarget>) {
        let target = target.into();

        self.queue(move |world: &mut World| {
            if let Err(e) = world.skip_dialogue(target) {
                error!("failed to skip dialogue: {e}");
            }
        });
    }

    fn end_dialogue(&mut self, target: impl Into<DialogueTarget>) {
        let target = target.into();

        self.queue(move |world: &mut World| {
            if let Err(e) = world.end_dialogue(target) {
                error!("failed to end dialogue: {e}");
            }
        });
    }
}
