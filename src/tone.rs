use crate::intent::is_casual_tone_request;
use crate::locale::Locale;
use crate::state::{Message, Sender};

/// How many trailing messages are checked for a casual-tone request
const CASUAL_WINDOW: usize = 3;

const CASUAL_EN: &[(&str, &str)] = &[
    ("We offer", "We've got"),
    ("Please", "Feel free to"),
    ("contact us", "reach out"),
    (".", "! "),
    ("Our", "Our awesome"),
    ("is", "is totally"),
    ("!  ", "! "),
];

const CASUAL_ID: &[(&str, &str)] = &[
    ("Kami menawarkan", "Kami punya"),
    ("Silakan", "Boleh banget"),
    ("hubungi kami", "kontak kami"),
    (".", "! "),
    ("website", "website keren"),
    ("adalah", "itu"),
    ("!  ", "! "),
];

/// Rewrites `text` in a chattier register. Each replacement runs once over
/// the whole string, in table order, on the output of the previous one.
pub fn casualize(text: &str, locale: Locale) -> String {
    let table = match locale {
        Locale::En => CASUAL_EN,
        Locale::Id => CASUAL_ID,
    };

    table
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// True when one of the last few messages is a user asking for a casual tone
pub fn wants_casual_tone(messages: &[Message]) -> bool {
    let start = messages.len().saturating_sub(CASUAL_WINDOW);
    messages[start..]
        .iter()
        .any(|m| m.sender == Sender::User && is_casual_tone_request(&m.content))
}
