use uuid::Uuid;

use crate::state::Message;

/// Character-by-character reveal of the newest bot message.
///
/// Only one message is tracked at a time. Pointing the typewriter at a
/// different message id restarts the reveal from empty. User messages are
/// always shown in full.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars_per_tick: usize,
    current: Option<Uuid>,
    shown: usize,
    total: usize,
}

impl Typewriter {
    pub fn new(chars_per_tick: usize) -> Self {
        Self {
            chars_per_tick: chars_per_tick.max(1),
            current: None,
            shown: 0,
            total: 0,
        }
    }

    /// Follows `message`, restarting when its id differs from the tracked one
    pub fn track(&mut self, message: &Message) {
        if !message.is_bot() {
            return;
        }
        if self.current != Some(message.id) {
            self.current = Some(message.id);
            self.shown = 0;
            self.total = message.content.chars().count();
        }
    }

    /// Advances one animation tick. Returns true while there is more to show.
    pub fn tick(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.shown = (self.shown + self.chars_per_tick).min(self.total);
        !self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.total
    }

    pub fn is_animating(&self, message: &Message) -> bool {
        self.current == Some(message.id) && !self.is_done()
    }

    /// The part of `message` that should be on screen right now
    pub fn visible<'a>(&self, message: &'a Message) -> &'a str {
        if !message.is_bot() || self.current != Some(message.id) {
            return &message.content;
        }
        match message.content.char_indices().nth(self.shown) {
            Some((byte_idx, _)) => &message.content[..byte_idx],
            None => &message.content,
        }
    }

    /// Shows the whole tracked message at once
    pub fn finish(&mut self) {
        self.shown = self.total;
    }
}
