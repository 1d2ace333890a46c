//! Conversation state.
//!
//! `ChatState` is owned by whoever drives the conversation (the desktop app
//! or a test) and handed to the composer by `&mut`. Everything else only
//! reads it through the accessors.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single chat message. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub is_code: bool,
    #[serde(default)]
    pub language: Option<String>,
}

impl Message {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender,
            timestamp: Local::now(),
            is_code: false,
            language: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content)
    }

    /// Bot message carrying a fenced code snippet
    pub fn bot_code(content: impl Into<String>, language: Option<String>) -> Self {
        Self {
            is_code: true,
            language,
            ..Self::new(Sender::Bot, content)
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<Message>,
    is_typing: bool,
    show_suggestions: bool,
    locale: Locale,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            is_typing: false,
            show_suggestions: true,
            locale: Locale::default(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    /// Locale of the latest user message
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Newest bot message, the only one that may be animating
    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_bot())
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn set_typing(&mut self, typing: bool) {
        self.is_typing = typing;
    }

    pub(crate) fn set_show_suggestions(&mut self, show: bool) {
        self.show_suggestions = show;
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}
