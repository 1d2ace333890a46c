//! Speech-to-text input seam.
//!
//! Recognition itself lives outside this crate. A provider hands over a
//! stream of transcript fragments and `Dictation` folds them into the text
//! that ends up in the message box.

use anyhow::Result;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFragment {
    pub text: String,
    /// Interim fragments may still be revised by the recognizer
    pub is_final: bool,
}

impl TranscriptFragment {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// A speech recognizer that streams transcript fragments
pub trait SpeechToText: Send + Sync {
    fn start(&self) -> Result<mpsc::Receiver<TranscriptFragment>>;
}

/// Accumulates fragments: final ones are committed, the latest interim one
/// is shown after them until it gets replaced.
#[derive(Debug, Clone, Default)]
pub struct Dictation {
    committed: String,
    pending: String,
}

impl Dictation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: TranscriptFragment) {
        if fragment.is_final {
            let text = fragment.text.trim();
            if !text.is_empty() {
                if !self.committed.is_empty() {
                    self.committed.push(' ');
                }
                self.committed.push_str(text);
            }
            self.pending.clear();
        } else {
            self.pending = fragment.text.trim().to_string();
        }
    }

    /// Text to show in the input box, pending tail included
    pub fn text(&self) -> String {
        match (self.committed.is_empty(), self.pending.is_empty()) {
            (_, true) => self.committed.clone(),
            (true, false) => self.pending.clone(),
            (false, false) => format!("{} {}", self.committed, self.pending),
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending.clear();
    }
}

/// Drains `rx` until the recognizer closes it and returns the committed text
pub async fn collect_transcript(mut rx: mpsc::Receiver<TranscriptFragment>) -> String {
    let mut dictation = Dictation::new();
    while let Some(fragment) = rx.recv().await {
        dictation.push(fragment);
    }
    dictation.committed().to_string()
}
