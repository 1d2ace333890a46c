use serde::{Deserialize, Serialize};

/// Supported response languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "id")]
    Id,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    /// Language name as used in generation prompts
    pub fn english_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Id => "Indonesian",
        }
    }
}

/// A string available in both locales
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual {
    #[serde(rename = "en", default)]
    pub english: String,
    #[serde(rename = "id", default)]
    pub indonesian: String,
}

impl Bilingual {
    pub fn new(english: impl Into<String>, indonesian: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            indonesian: indonesian.into(),
        }
    }

    /// Text for `locale`, `None` when that side is empty
    pub fn get(&self, locale: Locale) -> Option<&str> {
        let text = match locale {
            Locale::En => self.english.as_str(),
            Locale::Id => self.indonesian.as_str(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Common Indonesian function words
const INDONESIAN_WORDS: &[&str] = &[
    "apa", "bagaimana", "berapa", "mengapa", "kapan", "siapa", "dimana",
    "yang", "dan", "atau", "tetapi", "untuk", "dengan", "dari", "ini", "itu",
    "saya", "kami", "kita", "mereka", "dia", "ada", "tidak", "bisa",
    "akan", "sudah", "belum", "harus", "boleh", "dalam", "pada", "jika",
    "ketika", "karena", "oleh", "tentang", "sejak", "hingga", "sampai",
];

const INDONESIAN_RATIO: f64 = 0.15;

/// Classifies `text` as Indonesian when more than 15% of its words are
/// Indonesian function words. Anything else, empty input included, is English.
pub fn detect_language(text: &str) -> Locale {
    let lower = text.to_lowercase();
    let mut total = 0usize;
    let mut indonesian = 0usize;

    for token in lower.split_whitespace() {
        total += 1;
        let word = token.trim_end_matches(['.', ',', '?', '!', ';', ':']);
        if INDONESIAN_WORDS.contains(&word) {
            indonesian += 1;
        }
    }

    if total == 0 {
        return Locale::En;
    }

    if indonesian as f64 / total as f64 > INDONESIAN_RATIO {
        Locale::Id
    } else {
        Locale::En
    }
}
