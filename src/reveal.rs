//! Frame-paced, per-character text reveal.

/// Reveals a line's body one character at a time.
///
/// The first character is shown as soon as the reveal is created.
/// Each following character appears `frames_per_character` frames
/// after the previous one, and the reveal completes the same number
/// of frames after the last character. An empty body is complete
/// immediately.
///
/// A reveal only moves forward. Each new line gets a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    body: String,
    /// Byte offset of the end of the revealed prefix.
    shown: usize,
    frames_per_character: u32,
    countdown: u32,
    complete: bool,
}

impl Reveal {
    pub fn new(body: impl Into<String>, frames_per_character: u32) -> Self {
        let mut reveal = Self {
            body: body.into(),
            shown: 0,
            frames_per_character: frames_per_character.max(1),
            countdown: 0,
            complete: false,
        };
        reveal.push_character();

        reveal
    }

    /// The currently revealed prefix.
    pub fn text(&self) -> &str {
        &self.body[..self.shown]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance by one frame.
    ///
    /// Returns the revealed text if a character was added this frame.
    pub fn advance_frame(&mut self) -> Option<&str> {
        if self.complete {
            return None;
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }

        if self.push_character() {
            Some(self.text())
        } else {
            None
        }
    }

    /// Reveal everything at once.
    pub fn fill_in(&mut self) -> &str {
        self.shown = self.body.len();
        self.countdown = 0;
        self.complete = true;

        &self.body
    }

    fn push_character(&mut self) -> bool {
        match self.body[self.shown..].chars().next() {
            Some(character) => {
                self.shown += character.len_utf8();
                self.countdown = self.frames_per_character;
                true
            }
            None => {
                self.complete = true;
                false
            }
        }
    }
}
