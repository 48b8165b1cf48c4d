//! Player configuration.
//!
//! Settings that only matter when another setting is enabled live
//! in their own optional struct. Typing speed is only meaningful
//! with a [`TypingEffect`], and the skip delay only with [`AutoSkip`].

use crate::error::{DialogueError, DialogueResult};
use std::{ops::RangeInclusive, time::Duration};

/// Accepted range for [`TypingEffect::frames_between_characters`].
pub const FRAMES_BETWEEN_CHARACTERS: RangeInclusive<u32> = 1..=60;

/// How a [`DialoguePlayer`](crate::player::DialoguePlayer) presents its lines.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogueConfig {
    /// Write each line's title to the title surface.
    pub use_titles: bool,

    /// Reveal lines one character at a time.
    pub typing: Option<TypingEffect>,

    /// Advance on a timer once a line is fully shown.
    pub auto_skip: Option<AutoSkip>,

    /// Pause virtual time for as long as a dialogue is running.
    pub pause_during_dialogue: bool,

    /// Register the player as the default player when it's added.
    pub is_singleton: bool,
}

impl DialogueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles(mut self, use_titles: bool) -> Self {
        self.use_titles = use_titles;
        self
    }

    pub fn with_typing(mut self, typing: TypingEffect) -> Self {
        self.typing = Some(typing);
        self
    }

    /// Automatically advance `delay` after each line is fully revealed.
    pub fn with_auto_skip(mut self, delay: Duration) -> Self {
        self.auto_skip = Some(AutoSkip::new(delay));
        self
    }

    pub fn with_pause(mut self, pause_during_dialogue: bool) -> Self {
        self.pause_during_dialogue = pause_during_dialogue;
        self
    }

    pub fn singleton(mut self, is_singleton: bool) -> Self {
        self.is_singleton = is_singleton;
        self
    }

    /// Whether skipping a partially revealed line fills it in
    /// instead of advancing.
    pub fn fills_in_before_skip(&self) -> bool {
        self.typing.is_some_and(|t| t.fill_in_before_skip)
    }

    pub fn validate(&self) -> DialogueResult<()> {
        if let Some(typing) = &self.typing {
            typing.validate()?;
        }

        Ok(())
    }
}

/// Per-character reveal settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypingEffect {
    /// Frames to wait after each revealed character.
    pub frames_between_characters: u32,

    /// If set, the first skip on a partially revealed line
    /// fills in the rest of it, and only the next skip advances.
    pub fill_in_before_skip: bool,
}

impl TypingEffect {
    pub fn new(frames_between_characters: u32) -> Self {
        Self {
            frames_between_characters,
            fill_in_before_skip: false,
        }
    }

    pub fn with_fill_in(mut self, fill_in_before_skip: bool) -> Self {
        self.fill_in_before_skip = fill_in_before_skip;
        self
    }

    pub fn validate(&self) -> DialogueResult<()> {
        if FRAMES_BETWEEN_CHARACTERS.contains(&self.frames_between_characters) {
            Ok(())
        } else {
            Err(DialogueError::InvalidFrames(self.frames_between_characters))
        }
    }
}

impl Default for TypingEffect {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Automatic advance settings.
///
/// The delay is measured in real time, so it keeps running
/// while virtual time is paused.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "reflect", derive(bevy_reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoSkip {
    /// Persisted as seconds.
    #[cfg_attr(feature = "serde", serde(with = "secs_f32"))]
    pub time_until_skip: Duration,
}

#[cfg(feature = "serde")]
mod secs_f32 {
    use crate::error::DialogueError;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(duration.as_secs_f32())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = f32::deserialize(deserializer)?;
        Duration::try_from_secs_f32(seconds)
            .map_err(|_| D::Error::custom(DialogueError::InvalidSkipDelay(seconds)))
    }
}

impl AutoSkip {
    pub fn new(time_until_skip: Duration) -> Self {
        Self { time_until_skip }
    }

    /// Build from a delay in seconds, rejecting negative or non-finite values.
    pub fn from_secs_f32(seconds: f32) -> DialogueResult<Self> {
        Duration::try_from_secs_f32(seconds)
            .map(Self::new)
            .map_err(|_| DialogueError::InvalidSkipDelay(seconds))
    }
}
