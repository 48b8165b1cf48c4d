//! A queue-driven dialogue box for Bevy.
//!
//! Scripts are ordered lists of lines, each with an optional title.
//! A [`DialoguePlayer`](player::DialoguePlayer) plays them one line at a
//! time, optionally typing each line out and advancing on a timer.
//!
//! ```
//! use bevy_dialogue_box::prelude::*;
//! use bevy_ecs::prelude::*;
//! use std::time::Duration;
//!
//! fn setup(mut commands: Commands) {
//!     let config = DialogueConfig::new()
//!         .with_titles(true)
//!         .with_typing(TypingEffect::new(2).with_fill_in(true))
//!         .with_auto_skip(Duration::from_secs(2));
//!
//!     let Ok(player) = DialoguePlayer::new(config) else {
//!         return;
//!     };
//!     let player = commands.spawn(player).id();
//!
//!     commands.start_dialogue(
//!         player,
//!         (
//!             "Hello, Alice!".titled("Bob"),
//!             "Hey Bob...".titled("Alice"),
//!             "Mighty fine weather we're having, eh?".titled("Bob"),
//!         ),
//!     );
//! }
//! ```
//!
//! Output is written to the player entity's [`DialogueText`](surface::DialogueText),
//! [`DialogueTitle`](surface::DialogueTitle) and [`DialogueBox`](surface::DialogueBox)
//! components. Observe [`DialogueStarted`](surface::DialogueStarted) and
//! [`DialogueEnded`](surface::DialogueEnded) to react to a dialogue's lifecycle.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod player;
pub mod registry;
pub mod reveal;
pub mod script;
pub mod surface;
pub mod task;

pub use crate::app::{DialoguePlugin, DialogueSets};

pub mod prelude {
    pub use crate::{DialoguePlugin, DialogueSets};

    pub use crate::commands::{DialogueCommandsExt, DialogueWorldExt};

    pub use crate::config::{AutoSkip, DialogueConfig, TypingEffect};

    pub use crate::error::{DialogueError, DialogueResult};

    pub use crate::player::{DialoguePlayer, DialogueState};

    pub use crate::registry::{DEFAULT_ROLE, DialogueRegistry, DialogueTarget};

    pub use crate::script::{DialogueScript, IntoDialogueScript, Line, LineExt};

    pub use crate::surface::{
        DialogueBox, DialogueEnded, DialogueStarted, DialogueSurface, DialogueText,
        DialogueTitle, Notification, SimulationPause,
    };
}
