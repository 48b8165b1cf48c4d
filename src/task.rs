use crate::reveal::Reveal;
use bevy_time::{Timer, TimerMode};
use std::time::Duration;

/// The one suspended step of a playback.
#[derive(Debug, Clone)]
pub enum PlaybackTask {
    /// Revealing the current line, counted in frames.
    Reveal(Reveal),

    /// Waiting to advance past a fully shown line, counted in real time.
    AutoSkip(Timer),
}

impl PlaybackTask {
    pub fn auto_skip(delay: Duration) -> Self {
        Self::AutoSkip(Timer::new(delay, TimerMode::Once))
    }
}

/// Holds at most one [`PlaybackTask`].
///
/// Starting a task drops whatever was in flight, and cancelling
/// takes effect immediately.
#[derive(Debug, Clone, Default)]
pub struct TaskSlot(Option<PlaybackTask>);

impl TaskSlot {
    /// Start `task`, dropping whatever was in flight.
    pub fn replace(&mut self, task: PlaybackTask) {
        self.0 = Some(task);
    }

    /// Stop the task in flight, handing it back.
    pub fn cancel(&mut self) -> Option<PlaybackTask> {
        self.0.take()
    }

    pub fn get_mut(&mut self) -> Option<&mut PlaybackTask> {
        self.0.as_mut()
    }
}
