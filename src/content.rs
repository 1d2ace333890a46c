use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::locale::{Bilingual, Locale};

/// Content shipped with the binary
const BUILTIN_CONTENT: &str = include_str!("../data/content.json");

/// Id prefix of answers whose body is a fenced code snippet
pub const CODE_PREFIX: &str = "code-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Website,
    Academy,
    Coding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedQuestion {
    pub id: String,
    pub text: Bilingual,
    pub category: Category,
}

/// Static answers and suggested questions. Read-only once loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStore {
    #[serde(default)]
    answers: HashMap<String, Bilingual>,
    #[serde(default)]
    suggestions: Vec<SuggestedQuestion>,
}

impl ContentStore {
    pub fn from_json(json: &str) -> Result<Self> {
        let store: ContentStore = serde_json::from_str(json)?;
        Ok(store)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CONTENT).context("built-in content is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read content file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("cannot parse content file {}", path.display()))
    }

    /// Loads `path` if given, falling back to the built-in content on any error.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(store) => {
                    log::info!(
                        "📚 Content loaded from {}: {} answers, {} suggestions",
                        path.display(),
                        store.answers.len(),
                        store.suggestions.len()
                    );
                    return Ok(store);
                }
                Err(e) => {
                    log::warn!("⚠️ {:#}, using built-in content", e);
                }
            }
        }
        Self::builtin()
    }

    pub fn answer(&self, id: &str, locale: Locale) -> Option<&str> {
        self.answers.get(id).and_then(|a| a.get(locale))
    }

    /// Stored answer, or the generic "nothing on that yet" text
    pub fn answer_or_fallback(&self, id: &str, locale: Locale) -> &str {
        self.answer(id, locale).unwrap_or(match locale {
            Locale::En => NO_ANSWER_EN,
            Locale::Id => NO_ANSWER_ID,
        })
    }

    pub fn suggestions(&self) -> &[SuggestedQuestion] {
        &self.suggestions
    }

    pub fn suggestion(&self, id: &str) -> Option<&SuggestedQuestion> {
        self.suggestions.iter().find(|q| q.id == id)
    }
}

const NO_ANSWER_EN: &str = "I don't have specific information on that topic yet. Please ask something about our website development services or coding academy.";
const NO_ANSWER_ID: &str = "Saya belum memiliki informasi spesifik tentang topik tersebut. Silakan tanyakan sesuatu tentang layanan pengembangan website atau akademi coding kami.";
