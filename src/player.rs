//! The dialogue playback state machine.
//!
//! A [`DialoguePlayer`] is driven by three calls:
//!
//! - [`start`](DialoguePlayer::start) queues every line of a script
//!   and shows the first one.
//! - [`skip`](DialoguePlayer::skip) fills in a partially revealed line,
//!   or advances to the next line.
//! - [`end`](DialoguePlayer::end) hides the box and clears everything.
//!   It's called automatically after the last line.
//!
//! Between those, [`tick`](DialoguePlayer::tick) is called once per frame
//! to drive the typing effect and auto-skip timer.

use crate::{
    config::DialogueConfig,
    error::{DialogueError, DialogueResult},
    reveal::Reveal,
    script::{DialogueScript, IntoDialogueScript, Line},
    surface::{DialogueBox, DialogueSurface, DialogueText, DialogueTitle, Notification},
    task::{PlaybackTask, TaskSlot},
};
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use std::{collections::VecDeque, sync::Arc, time::Duration};

/// Where a player is in its playback.
///
/// Ending is instantaneous, so a player that has just ended
/// is already back to [`DialogueState::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueState {
    /// No dialogue is running.
    Idle,

    /// The current line is still being typed out.
    Revealing,

    /// The current line is fully shown.
    AwaitingAdvance,
}

#[derive(Debug, Default, Clone, Component)]
#[require(DialogueText, DialogueTitle, DialogueBox)]
pub struct DialoguePlayer {
    config: DialogueConfig,
    script: Option<Arc<DialogueScript>>,
    pending: VecDeque<Line>,
    current: Option<Line>,
    task: TaskSlot,
    reveal_complete: bool,
    active: bool,
    paused_simulation: bool,
}

impl DialoguePlayer {
    pub fn new(config: DialogueConfig) -> DialogueResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Default::default()
        })
    }

    /// Attach a script to replay with [`start_attached`](Self::start_attached).
    pub fn with_script(mut self, script: impl IntoDialogueScript) -> Self {
        self.script = Some(script.into_script());
        self
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A running dialogue picks up the new settings from its next line.
    pub fn set_config(&mut self, config: DialogueConfig) -> DialogueResult<()> {
        config.validate()?;
        self.config = config;

        Ok(())
    }

    pub fn script(&self) -> Option<&Arc<DialogueScript>> {
        self.script.as_ref()
    }

    pub fn set_script(&mut self, script: impl IntoDialogueScript) {
        self.script = Some(script.into_script());
    }

    pub fn state(&self) -> DialogueState {
        match (self.active, self.reveal_complete) {
            (false, _) => DialogueState::Idle,
            (true, false) => DialogueState::Revealing,
            (true, true) => DialogueState::AwaitingAdvance,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_reveal_complete(&self) -> bool {
        self.reveal_complete
    }

    pub fn current_line(&self) -> Option<&Line> {
        self.current.as_ref()
    }

    /// Lines queued after the current one.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Whether this player currently holds virtual time paused.
    pub fn is_pausing_simulation(&self) -> bool {
        self.paused_simulation
    }

    /// Attach `script` and play it from the start.
    ///
    /// A dialogue that is already running is ended first.
    pub fn start(&mut self, script: impl IntoDialogueScript, surface: &mut impl DialogueSurface) {
        self.script = Some(script.into_script());
        self.begin(surface);
    }

    /// Play the attached script from the start.
    pub fn start_attached(&mut self, surface: &mut impl DialogueSurface) -> DialogueResult<()> {
        if self.script.is_none() {
            return Err(DialogueError::MissingScript);
        }

        self.begin(surface);
        Ok(())
    }

    /// Advance the dialogue.
    ///
    /// If the typing effect fills in before skipping and the current line is
    /// still being revealed, this shows the full line instead of advancing.
    /// Does nothing while no dialogue is running.
    pub fn skip(&mut self, surface: &mut impl DialogueSurface) {
        if !self.active {
            return;
        }

        let interrupted = self.task.cancel();

        if self.config.fills_in_before_skip() && !self.reveal_complete {
            // Filling in never schedules an auto-skip; the next skip advances.
            match (interrupted, &self.current) {
                (Some(PlaybackTask::Reveal(mut reveal)), _) => {
                    surface.set_text(reveal.fill_in());
                }
                (_, Some(line)) => surface.set_text(line.body()),
                (_, None) => {}
            }
            self.reveal_complete = true;
        } else {
            self.next_line(surface);
        }
    }

    /// Stop the dialogue, hiding and clearing the box.
    ///
    /// Calling this while no dialogue is running does nothing.
    pub fn end(&mut self, surface: &mut impl DialogueSurface) {
        if !self.active {
            return;
        }

        surface.set_visible(false);
        surface.set_text("");
        surface.set_title("");

        self.task.cancel();
        self.pending.clear();
        self.current = None;
        self.reveal_complete = false;
        self.active = false;

        if self.paused_simulation {
            surface.resume_simulation();
            self.paused_simulation = false;
        }

        debug!("dialogue ended");
        surface.notify(Notification::Ended);
    }

    /// Advance one frame.
    ///
    /// The typing effect counts calls to this method. The auto-skip
    /// timer counts `real_delta`.
    pub fn tick(&mut self, real_delta: Duration, surface: &mut impl DialogueSurface) {
        if !self.active {
            return;
        }

        match self.task.get_mut() {
            Some(PlaybackTask::Reveal(reveal)) => {
                if let Some(text) = reveal.advance_frame() {
                    surface.set_text(text);
                }

                if reveal.is_complete() {
                    self.finish_reveal();
                }
            }
            Some(PlaybackTask::AutoSkip(timer)) => {
                timer.tick(real_delta);

                if timer.finished() {
                    self.next_line(surface);
                }
            }
            None => {}
        }
    }

    fn begin(&mut self, surface: &mut impl DialogueSurface) {
        self.end(surface);

        let Some(script) = self.script.clone() else {
            return;
        };

        debug!("starting dialogue with {} lines", script.len());
        surface.notify(Notification::Started);
        self.active = true;

        if script.is_empty() {
            self.end(surface);
            return;
        }

        if self.config.pause_during_dialogue {
            surface.pause_simulation();
            self.paused_simulation = true;
        }

        self.pending.extend(script.lines().iter().cloned());
        surface.set_visible(true);
        self.next_line(surface);
    }

    fn next_line(&mut self, surface: &mut impl DialogueSurface) {
        self.task.cancel();
        self.reveal_complete = false;

        let Some(line) = self.pending.pop_front() else {
            self.end(surface);
            return;
        };

        trace!("showing line {:?}", line.body());
        surface.set_text("");
        if self.config.use_titles {
            surface.set_title(line.title());
        }

        match self.config.typing {
            Some(typing) => {
                let reveal = Reveal::new(line.body(), typing.frames_between_characters);
                surface.set_text(reveal.text());

                if reveal.is_complete() {
                    self.finish_reveal();
                } else {
                    self.task.replace(PlaybackTask::Reveal(reveal));
                }
            }
            None => {
                surface.set_text(line.body());
                self.finish_reveal();
            }
        }

        self.current = Some(line);
    }

    fn finish_reveal(&mut self) {
        self.reveal_complete = true;

        match self.config.auto_skip {
            Some(auto_skip) => {
                self.task
                    .replace(PlaybackTask::auto_skip(auto_skip.time_until_skip));
            }
            None => {
                self.task.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TypingEffect, script::LineExt};

    #[derive(Debug, Default)]
    struct Recorder {
        text: String,
        title: String,
        visible: bool,
        paused: bool,
        visible_writes: usize,
        ever_visible: bool,
        notifications: Vec<Notification>,
        shown: Vec<String>,
    }

    impl DialogueSurface for Recorder {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_owned();
        }

        fn set_title(&mut self, title: &str) {
            self.title = title.to_owned();
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
            self.visible_writes += 1;
            self.ever_visible |= visible;
        }

        fn pause_simulation(&mut self) {
            self.paused = true;
        }

        fn resume_simulation(&mut self) {
            self.paused = false;
        }

        fn notify(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }
    }

    impl Recorder {
        fn record(&mut self, player: &DialoguePlayer) {
            if let Some(line) = player.current_line() {
                self.shown.push(line.body().to_owned());
            }
        }
    }

    fn player(config: DialogueConfig) -> DialoguePlayer {
        DialoguePlayer::new(config).unwrap()
    }

    fn frame(player: &mut DialoguePlayer, surface: &mut Recorder) {
        player.tick(Duration::from_millis(16), surface);
    }

    #[test]
    fn titles_and_instant_text() {
        let mut player = player(DialogueConfig::new().with_titles(true));
        let mut surface = Recorder::default();

        player.start(("Hi".titled("Alice"), "Hello".titled("Bob")), &mut surface);
        assert_eq!(surface.notifications, [Notification::Started]);
        assert!(surface.visible);
        assert_eq!((surface.title.as_str(), surface.text.as_str()), ("Alice", "Hi"));
        assert_eq!(player.state(), DialogueState::AwaitingAdvance);

        player.skip(&mut surface);
        assert_eq!((surface.title.as_str(), surface.text.as_str()), ("Bob", "Hello"));

        player.skip(&mut surface);
        assert_eq!(
            surface.notifications,
            [Notification::Started, Notification::Ended]
        );
        assert!(!surface.visible);
        assert_eq!(surface.text, "");
        assert_eq!(surface.title, "");
        assert_eq!(player.state(), DialogueState::Idle);
        assert!(player.current_line().is_none());
    }

    #[test]
    fn lines_play_in_authored_order() {
        let lines: Vec<_> = (0..12).map(|i| format!("line {i}")).collect();
        let mut player = player(DialogueConfig::new());
        let mut surface = Recorder::default();

        player.start(lines.clone(), &mut surface);
        while player.is_active() {
            surface.record(&player);
            player.skip(&mut surface);
        }

        assert_eq!(surface.shown, lines);
    }

    #[test]
    fn titles_disabled_never_writes_title() {
        let mut player = player(DialogueConfig::new());
        let mut surface = Recorder {
            title: "untouched".into(),
            ..Default::default()
        };

        player.start(("Hi".titled("Alice"),), &mut surface);
        assert_eq!(surface.title, "untouched");
        assert_eq!(surface.text, "Hi");
    }

    #[test]
    fn typing_reveals_over_frames() {
        let config = DialogueConfig::new().with_typing(TypingEffect::new(1).with_fill_in(true));
        let mut player = player(config);
        let mut surface = Recorder::default();

        player.start(("Typed text",), &mut surface);
        assert_eq!(surface.text, "T");
        assert_eq!(player.state(), DialogueState::Revealing);

        for _ in 0.."Typed text".len() - 1 {
            frame(&mut player, &mut surface);
        }
        assert_eq!(surface.text, "Typed text");
        assert!(!player.is_reveal_complete());

        frame(&mut player, &mut surface);
        assert!(player.is_reveal_complete());
        assert_eq!(player.state(), DialogueState::AwaitingAdvance);
    }

    #[test]
    fn fill_in_then_advance() {
        let config = DialogueConfig::new().with_typing(TypingEffect::new(1).with_fill_in(true));
        let mut player = player(config);
        let mut surface = Recorder::default();

        player.start(("Typed text",), &mut surface);
        frame(&mut player, &mut surface);
        frame(&mut player, &mut surface);
        assert_eq!(surface.text, "Typ");

        player.skip(&mut surface);
        assert_eq!(surface.text, "Typed text");
        assert!(player.is_reveal_complete());
        assert!(player.is_active());

        // The cancelled reveal must not keep typing.
        frame(&mut player, &mut surface);
        assert_eq!(surface.text, "Typed text");

        player.skip(&mut surface);
        assert!(!player.is_active());
        assert_eq!(surface.notifications.last(), Some(&Notification::Ended));
    }

    #[test]
    fn fill_in_waits_for_manual_skip_with_auto_skip() {
        let config = DialogueConfig::new()
            .with_typing(TypingEffect::new(1).with_fill_in(true))
            .with_auto_skip(Duration::from_secs(1));
        let mut player = player(config);
        let mut surface = Recorder::default();

        player.start(("Typed text", "Second"), &mut surface);
        player.skip(&mut surface);
        assert_eq!(surface.text, "Typed text");

        player.tick(Duration::from_secs(2), &mut surface);
        player.tick(Duration::from_secs(2), &mut surface);
        assert_eq!(surface.text, "Typed text");
        assert_eq!(player.state(), DialogueState::AwaitingAdvance);

        player.skip(&mut surface);
        assert_eq!(surface.text, "S");
    }

    #[test]
    fn skip_without_fill_in_advances_mid_reveal() {
        let config = DialogueConfig::new().with_typing(TypingEffect::new(4));
        let mut player = player(config);
        let mut surface = Recorder::default();

        player.start(("First line", "Second"), &mut surface);
        player.skip(&mut surface);

        assert_eq!(surface.text, "S");
        assert_eq!(player.current_line().map(Line::body), Some("Second"));
    }

    #[test]
    fn instant_mode_always_advances() {
        let mut config =
            DialogueConfig::new().with_typing(TypingEffect::new(1).with_fill_in(true));
        config.typing = None;

        let mut player = player(config);
        let mut surface = Recorder::default();

        player.start(("One", "Two"), &mut surface);
        assert!(player.is_reveal_complete());
        assert_eq!(surface.text, "One");

        player.skip(&mut surface);
        assert_eq!(surface.text, "Two");
    }

    #[test]
    fn empty_script_starts_and_ends() {
        let mut player = player(DialogueConfig::new().with_pause(true));
        let mut surface = Recorder::default();

        player.start((), &mut surface);

        assert_eq!(
            surface.notifications,
            [Notification::Started, Notification::Ended]
        );
        assert!(!surface.visible);
        assert!(!surface.ever_visible);
        assert!(!surface.paused);
        assert!(!player.is_active());
    }

    #[test]
    fn end_is_idempotent() {
        let mut player = player(DialogueConfig::new());
        let mut surface = Recorder::default();

        player.start(("a", "b"), &mut surface);
        player.end(&mut surface);
        let writes = surface.visible_writes;
        player.end(&mut surface);
        player.end(&mut surface);

        assert_eq!(surface.visible_writes, writes);
        assert_eq!(
            surface.notifications,
            [Notification::Started, Notification::Ended]
        );
        assert_eq!(player.remaining(), 0);
    }

    #[test]
    fn skip_while_idle_is_ignored() {
        let mut player = player(DialogueConfig::new());
        let mut surface = Recorder::default();

        player.skip(&mut surface);

        assert!(surface.notifications.is_empty());
        assert_eq!(player.state(), DialogueState::Idle);
    }

    #[test]
    fn restarting_ends_the_previous_session() {
        let mut player = player(DialogueConfig::new().with_titles(true));
        let mut surface = Recorder::default();

        player.start(("a", "b", "c"), &mut surface);
        player.start(("Fresh".titled("Carol"),), &mut surface);

        assert_eq!(
            surface.notifications,
            [
                Notification::Started,
                Notification::Ended,
                Notification::Started
            ]
        );
        assert_eq!(surface.text, "Fresh");
        assert_eq!(player.remaining(), 0);

        player.skip(&mut surface);
        assert_eq!(surface.notifications.len(), 4);
    }

    #[test]
    fn auto_skip_waits_for_real_time() {
        let mut player = player(DialogueConfig::new().with_auto_skip(Duration::from_secs(2)));
        let mut surface = Recorder::default();

        player.start(("One", "Two"), &mut surface);

        player.tick(Duration::from_millis(1500), &mut surface);
        assert_eq!(surface.text, "One");

        player.tick(Duration::from_millis(500), &mut surface);
        assert_eq!(surface.text, "Two");

        player.tick(Duration::from_secs(2), &mut surface);
        assert!(!player.is_active());
        assert_eq!(
            surface.notifications,
            [Notification::Started, Notification::Ended]
        );
    }

    #[test]
    fn auto_skip_starts_after_reveal() {
        let config = DialogueConfig::new()
            .with_typing(TypingEffect::new(1))
            .with_auto_skip(Duration::from_secs(1));
        let mut player = player(config);
        let mut surface = Recorder::default();

        player.start(("abc", "next"), &mut surface);

        // Time spent revealing does not count toward the skip delay.
        for _ in 0..3 {
            player.tick(Duration::from_secs(5), &mut surface);
        }
        assert!(player.is_reveal_complete());
        assert_eq!(surface.text, "abc");

        player.tick(Duration::from_secs(1), &mut surface);
        assert_eq!(surface.text, "n");
    }

    #[test]
    fn manual_skip_cancels_auto_skip() {
        let mut player = player(DialogueConfig::new().with_auto_skip(Duration::from_secs(1)));
        let mut surface = Recorder::default();

        player.start(("a", "b", "c"), &mut surface);
        player.tick(Duration::from_millis(900), &mut surface);
        player.skip(&mut surface);
        assert_eq!(surface.text, "b");

        // A fresh timer started for "b".
        player.tick(Duration::from_millis(900), &mut surface);
        assert_eq!(surface.text, "b");
    }

    #[test]
    fn pause_is_released_on_end() {
        let mut player = player(DialogueConfig::new().with_pause(true));
        let mut surface = Recorder::default();

        player.start(("a",), &mut surface);
        assert!(surface.paused);
        assert!(player.is_pausing_simulation());

        player.skip(&mut surface);
        assert!(!surface.paused);
        assert!(!player.is_pausing_simulation());
    }

    #[test]
    fn attached_script_replays() {
        let mut player = player(DialogueConfig::new());
        let mut surface = Recorder::default();

        assert_eq!(
            player.start_attached(&mut surface),
            Err(DialogueError::MissingScript)
        );
        assert!(surface.notifications.is_empty());

        let mut player = player.with_script(("again",));
        player.start_attached(&mut surface).unwrap();
        player.skip(&mut surface);
        player.start_attached(&mut surface).unwrap();

        assert_eq!(surface.text, "again");
        assert_eq!(surface.notifications.len(), 3);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = DialogueConfig::new().with_typing(TypingEffect::new(0));
        assert_eq!(
            DialoguePlayer::new(config.clone()).err(),
            Some(DialogueError::InvalidFrames(0))
        );

        let mut player = player(DialogueConfig::new());
        assert!(player.set_config(config).is_err());
        assert_eq!(player.config(), &DialogueConfig::new());
    }
}
