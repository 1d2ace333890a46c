//! Rule-based intent classifiers.
//!
//! Every table here is scanned in order and the first hit wins, so the order
//! of entries is part of the observable behaviour.

use regex::Regex;
use std::sync::LazyLock;

use crate::content::ContentStore;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CodeRequest,
    Greeting,
    Thanks,
    CasualTone,
    Pricing,
    Unclassified,
}

const CASUAL_PATTERNS: &[&str] = &[
    "be more casual",
    "less formal",
    "talk casual",
    "speak casual",
    "be friendly",
    "lebih santai",
    "kurang formal",
    "bicara santai",
    "ngobrol santai",
];

pub fn is_casual_tone_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    CASUAL_PATTERNS.iter().any(|p| lower.contains(p))
}

static CODE_REQUEST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"how (to|do i|can i) (create|make|build|implement|code|write)",
        r"show (me )?(a |an |the )?([\w.+#-]+ ){0,3}(example|code|snippet)",
        r"give (me )?(a |an |the )?([\w.+#-]+ ){0,3}(example|code|snippet)",
        r"sample (code|program|app)",
        r"bagaimana (cara )?(membuat|mengimplementasikan|menulis|coding)",
        r"berikan (contoh|kode|snippet)",
        r"tunjukkan (contoh|kode|snippet)",
        r"contoh (kode|program|aplikasi)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("code request pattern"))
    .collect()
});

/// Topic table for code requests: keywords, highlight language, snippet id
pub struct CodeTopic {
    pub keywords: &'static [&'static str],
    pub language: &'static str,
    pub snippet: &'static str,
}

pub const CODE_TOPICS: &[CodeTopic] = &[
    CodeTopic {
        keywords: &["react", "component", "counter", "komponen", "penghitung"],
        language: "javascript",
        snippet: "react-example",
    },
    CodeTopic {
        keywords: &["javascript", "toggle", "dark mode", "theme", "mode gelap", "tema"],
        language: "javascript",
        snippet: "javascript-example",
    },
    CodeTopic {
        keywords: &["html", "website", "page", "struktur", "halaman"],
        language: "html",
        snippet: "html-example",
    },
    CodeTopic {
        keywords: &["python", "flask", "api", "backend", "todo", "tugas"],
        language: "python",
        snippet: "python-example",
    },
    CodeTopic {
        keywords: &["dart", "flutter", "mobile", "aplikasi", "mobile app"],
        language: "dart",
        snippet: "dart-example",
    },
];

/// Highlight language of a snippet id such as `react-example`
pub fn snippet_language(snippet: &str) -> Option<&'static str> {
    CODE_TOPICS
        .iter()
        .find(|t| t.snippet == snippet)
        .map(|t| t.language)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMatch {
    pub is_code: bool,
    pub language: Option<&'static str>,
    pub snippet: Option<&'static str>,
}

pub fn match_code_request(text: &str) -> CodeMatch {
    let lower = text.to_lowercase();

    if !CODE_REQUEST_PATTERNS.iter().any(|re| re.is_match(&lower)) {
        return CodeMatch::default();
    }

    CODE_TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| lower.contains(k)))
        .map(|topic| CodeMatch {
            is_code: true,
            language: Some(topic.language),
            snippet: Some(topic.snippet),
        })
        .unwrap_or_default()
}

/// Keyword to answer ids. Academy-specific phrases sit above the generic
/// pricing words so they are seen first.
const KEYWORD_ANSWERS: &[(&str, &[&str])] = &[
    ("bootcamp cost", &["academy-pricing"]),
    ("course cost", &["academy-pricing"]),
    ("tuition", &["academy-pricing"]),
    ("biaya bootcamp", &["academy-pricing"]),
    ("harga bootcamp", &["academy-pricing"]),
    ("biaya kursus", &["academy-pricing"]),
    ("harga kursus", &["academy-pricing"]),
    ("pricing", &["website-pricing", "academy-pricing"]),
    ("cost", &["website-pricing", "academy-pricing"]),
    ("harga", &["website-pricing", "academy-pricing"]),
    ("biaya", &["website-pricing", "academy-pricing"]),
    ("timeline", &["website-timeline"]),
    ("waktu", &["website-timeline"]),
    ("technology", &["website-technologies"]),
    ("teknologi", &["website-technologies"]),
    ("course", &["academy-courses"]),
    ("kursus", &["academy-courses"]),
    ("instructor", &["academy-instructors"]),
    ("pengajar", &["academy-instructors"]),
    ("guru", &["academy-instructors"]),
];

/// Id of the first keyword-matched answer populated for `locale`
pub fn find_keyword_answer_id(text: &str, locale: Locale, store: &ContentStore) -> Option<&'static str> {
    let lower = text.to_lowercase();

    for (keyword, ids) in KEYWORD_ANSWERS {
        if !lower.contains(keyword) {
            continue;
        }
        if let Some(id) = ids.iter().copied().find(|id| store.answer(id, locale).is_some()) {
            return Some(id);
        }
    }
    None
}

pub fn find_keyword_answer<'a>(text: &str, locale: Locale, store: &'a ContentStore) -> Option<&'a str> {
    find_keyword_answer_id(text, locale, store).and_then(|id| store.answer(id, locale))
}

const GREETING_WORDS: &[&str] = &["hello", "hi", "halo", "hai"];
const THANKS_WORDS: &[&str] = &["thanks", "thank you", "terima kasih", "makasih"];

/// Plain substring check, "this" counts as a greeting
pub fn is_greeting(text: &str) -> bool {
    let lower = text.to_lowercase();
    GREETING_WORDS.iter().any(|w| lower.contains(w))
}

pub fn is_thanks(text: &str) -> bool {
    let lower = text.to_lowercase();
    THANKS_WORDS.iter().any(|w| lower.contains(w))
}

fn is_pricing(text: &str) -> bool {
    let lower = text.to_lowercase();
    ["pricing", "cost", "harga", "biaya", "tuition"]
        .iter()
        .any(|w| lower.contains(w))
}

/// Coarse label for logs, checked in the composer's resolution order
pub fn classify(text: &str) -> Intent {
    if match_code_request(text).is_code {
        Intent::CodeRequest
    } else if is_greeting(text) {
        Intent::Greeting
    } else if is_thanks(text) {
        Intent::Thanks
    } else if is_casual_tone_request(text) {
        Intent::CasualTone
    } else if is_pricing(text) {
        Intent::Pricing
    } else {
        Intent::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentStore {
        ContentStore::builtin().unwrap()
    }

    #[test]
    fn casual_requests_in_both_languages() {
        assert!(is_casual_tone_request("Can you BE MORE CASUAL please"));
        assert!(is_casual_tone_request("tolong lebih santai ya"));
        assert!(!is_casual_tone_request("what are your prices"));
    }

    #[test]
    fn indonesian_react_request() {
        let m = match_code_request("bagaimana cara membuat komponen react");
        assert_eq!(
            m,
            CodeMatch {
                is_code: true,
                language: Some("javascript"),
                snippet: Some("react-example"),
            }
        );
    }

    #[test]
    fn english_react_request() {
        let m = match_code_request("show me a react component example");
        assert!(m.is_code);
        assert_eq!(m.snippet, Some("react-example"));
        assert_eq!(m.language, Some("javascript"));
    }

    #[test]
    fn topic_table_order_breaks_ties() {
        // "react" and "html" both present, react row comes first
        let m = match_code_request("show me an html react example");
        assert_eq!(m.snippet, Some("react-example"));
    }

    #[test]
    fn request_pattern_without_topic_is_not_code() {
        assert_eq!(match_code_request("show me an example"), CodeMatch::default());
    }

    #[test]
    fn topic_without_request_pattern_is_not_code() {
        assert!(!match_code_request("I love python").is_code);
        assert!(!match_code_request("do you teach flutter?").is_code);
    }

    #[test]
    fn dart_request_resolves_topic() {
        let m = match_code_request("How do I build a flutter app?");
        assert_eq!(m.snippet, Some("dart-example"));
        assert_eq!(m.language, Some("dart"));
    }

    #[test]
    fn harga_in_indonesian_returns_website_pricing() {
        let store = store();
        let answer = find_keyword_answer("Berapa harga pembuatan website?", Locale::Id, &store);
        assert_eq!(answer, store.answer("website-pricing", Locale::Id));
    }

    #[test]
    fn bootcamp_cost_returns_academy_pricing() {
        let store = store();
        assert_eq!(
            find_keyword_answer_id("Berapa biaya bootcamp coding?", Locale::Id, &store),
            Some("academy-pricing")
        );
        assert_eq!(
            find_keyword_answer_id("How much does the coding bootcamp cost?", Locale::En, &store),
            Some("academy-pricing")
        );
    }

    #[test]
    fn keyword_skips_unpopulated_answers() {
        let store = ContentStore::from_json(
            r#"{"answers": {"academy-pricing": {"en": "Academy prices", "id": "Harga akademi"}}}"#,
        )
        .unwrap();
        assert_eq!(
            find_keyword_answer("pricing?", Locale::En, &store),
            Some("Academy prices")
        );
        assert_eq!(find_keyword_answer("who is your guru", Locale::En, &store), None);
    }

    #[test]
    fn no_keyword_no_answer() {
        assert_eq!(find_keyword_answer("tell me a joke", Locale::En, &store()), None);
    }

    #[test]
    fn greeting_and_thanks() {
        assert!(is_greeting("Halo Amagi"));
        assert!(is_greeting("this"));
        assert!(is_thanks("Terima kasih banyak"));
        assert!(!is_thanks("hello"));
    }

    #[test]
    fn classify_follows_resolution_order() {
        assert_eq!(classify("how to create a react counter"), Intent::CodeRequest);
        assert_eq!(classify("hello"), Intent::Greeting);
        assert_eq!(classify("thanks a lot"), Intent::Thanks);
        assert_eq!(classify("be more casual"), Intent::CasualTone);
        assert_eq!(classify("berapa biaya kursus"), Intent::Pricing);
        assert_eq!(classify("tell me a joke"), Intent::Unclassified);
    }

    #[test]
    fn snippet_language_lookup() {
        assert_eq!(snippet_language("html-example"), Some("html"));
        assert_eq!(snippet_language("missing"), None);
    }
}
