//! Response composition.
//!
//! A send is split in three steps so the desktop app can run the slow part
//! off the UI thread:
//!
//! 1. `begin` records the user message and raises the typing flag,
//! 2. `resolve` picks the reply text (may call the generation endpoint),
//! 3. `finish` appends the bot message and lowers the typing flag.
//!
//! `send` runs all three in sequence. Suggested questions take the same
//! path through `begin_suggestion` and `select_suggestion`.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::TextGenerator;
use crate::content::{ContentStore, CODE_PREFIX};
use crate::intent;
use crate::locale::{detect_language, Locale};
use crate::state::{ChatState, Message};
use crate::tone::{casualize, wants_casual_tone};

/// A user message waiting for its reply
#[derive(Debug, Clone)]
pub struct Turn {
    pub text: String,
    pub locale: Locale,
    pub casual: bool,
    /// Set when the turn came from a suggested question
    pub suggestion: Option<String>,
}

/// The bot's answer to a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub is_code: bool,
    pub language: Option<String>,
}

impl Reply {
    fn prose(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_code: false,
            language: None,
        }
    }

    fn into_message(self) -> Message {
        if self.is_code {
            Message::bot_code(self.text, self.language)
        } else {
            Message::bot(self.text)
        }
    }
}

#[derive(Clone)]
pub struct Composer {
    store: Arc<ContentStore>,
    generator: Arc<dyn TextGenerator>,
    simulate_delay: bool,
}

impl Composer {
    pub fn new(store: Arc<ContentStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            store,
            generator,
            simulate_delay: false,
        }
    }

    /// Waits a human-ish typing delay before each reply
    pub fn with_simulated_delay(mut self, enabled: bool) -> Self {
        self.simulate_delay = enabled;
        self
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Appends the session's opening message
    pub fn greet(&self, state: &mut ChatState) {
        let text = match state.locale() {
            Locale::En => WELCOME_EN,
            Locale::Id => WELCOME_ID,
        };
        state.push(Message::bot(text));
    }

    /// Records the user's message. Blank input is ignored and returns `None`.
    pub fn begin(&self, state: &mut ChatState, text: &str) -> Option<Turn> {
        if text.trim().is_empty() {
            return None;
        }

        let locale = detect_language(text);
        state.set_locale(locale);
        state.push(Message::user(text));
        state.set_typing(true);
        state.set_show_suggestions(false);

        let casual = wants_casual_tone(state.messages());
        log::info!(
            "💬 User message ({}, intent {:?}, casual {})",
            locale.code(),
            intent::classify(text),
            casual
        );

        Some(Turn {
            text: text.to_string(),
            locale,
            casual,
            suggestion: None,
        })
    }

    /// Picks the reply for `turn`. Never fails: generation errors become
    /// the apology text for the turn's locale.
    pub async fn resolve(&self, turn: &Turn) -> Reply {
        if self.simulate_delay {
            tokio::time::sleep(simulate_typing_delay(&turn.text)).await;
        }

        if let Some(question_id) = &turn.suggestion {
            return self.answer_suggestion(turn, question_id);
        }

        let locale = turn.locale;
        let code = intent::match_code_request(&turn.text);

        // Snippets are returned verbatim
        if code.is_code {
            let id = format!("{}{}", CODE_PREFIX, code.snippet.unwrap_or_default());
            return match self.store.answer(&id, locale) {
                Some(body) => {
                    log::debug!("🧩 Snippet {}", id);
                    Reply {
                        text: body.to_string(),
                        is_code: true,
                        language: code.language.map(str::to_string),
                    }
                }
                None => {
                    log::debug!("🧩 No snippet stored for {}", id);
                    self.tone(turn, no_example(locale))
                }
            };
        }

        let text = if intent::is_greeting(&turn.text) {
            pick(locale, GREETING_EN, GREETING_ID).to_string()
        } else if intent::is_thanks(&turn.text) {
            pick(locale, THANKS_EN, THANKS_ID).to_string()
        } else if intent::is_casual_tone_request(&turn.text) {
            pick(locale, CASUAL_ACK_EN, CASUAL_ACK_ID).to_string()
        } else if let Some(answer) = intent::find_keyword_answer(&turn.text, locale, &self.store) {
            answer.to_string()
        } else {
            self.generate(&turn.text, locale).await
        };

        self.tone(turn, &text)
    }

    async fn generate(&self, question: &str, locale: Locale) -> String {
        log::debug!("📡 Asking {}", self.generator.name());
        match self.generator.generate(question, locale).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("⚠️ Generation failed ({}): {:#}", self.generator.name(), e);
                pick(locale, APOLOGY_EN, APOLOGY_ID).to_string()
            }
        }
    }

    fn tone(&self, turn: &Turn, text: &str) -> Reply {
        if turn.casual {
            Reply::prose(casualize(text, turn.locale))
        } else {
            Reply::prose(text)
        }
    }

    /// Appends the reply and lowers the typing flag
    pub fn finish(&self, state: &mut ChatState, reply: Reply) {
        state.push(reply.into_message());
        state.set_typing(false);
    }

    /// Full send: record, resolve and append. Returns false for blank input.
    pub async fn send(&self, state: &mut ChatState, text: &str) -> bool {
        let Some(turn) = self.begin(state, text) else {
            return false;
        };
        let reply = self.resolve(&turn).await;
        self.finish(state, reply);
        true
    }

    /// Records a suggested question, in the session locale, as the user's
    /// message. Unknown ids change nothing and return `None`.
    pub fn begin_suggestion(&self, state: &mut ChatState, question_id: &str) -> Option<Turn> {
        let Some(question) = self.store.suggestion(question_id) else {
            log::warn!("⚠️ Unknown suggested question {}", question_id);
            return None;
        };

        let locale = state.locale();
        let text = question
            .text
            .get(locale)
            .or_else(|| question.text.get(Locale::En))
            .unwrap_or(question_id)
            .to_string();

        state.push(Message::user(text.clone()));
        state.set_typing(true);
        state.set_show_suggestions(false);

        let casual = wants_casual_tone(state.messages());
        log::info!("💡 Suggested question {} ({})", question_id, locale.code());

        Some(Turn {
            text,
            locale,
            casual,
            suggestion: Some(question_id.to_string()),
        })
    }

    /// Stored answer for a suggested question. `code-` ids keep their
    /// snippet verbatim and carry the topic's language.
    fn answer_suggestion(&self, turn: &Turn, question_id: &str) -> Reply {
        let answer = self.store.answer_or_fallback(question_id, turn.locale);
        match question_id.strip_prefix(CODE_PREFIX) {
            Some(snippet) if self.store.answer(question_id, turn.locale).is_some() => Reply {
                text: answer.to_string(),
                is_code: true,
                language: intent::snippet_language(snippet).map(str::to_string),
            },
            _ => self.tone(turn, answer),
        }
    }

    /// Full suggestion round: record, resolve and append
    pub async fn select_suggestion(&self, state: &mut ChatState, question_id: &str) -> bool {
        let Some(turn) = self.begin_suggestion(state, question_id) else {
            return false;
        };
        let reply = self.resolve(&turn).await;
        self.finish(state, reply);
        true
    }

    pub fn toggle_suggestions(&self, state: &mut ChatState) {
        let show = !state.show_suggestions();
        state.set_show_suggestions(show);
    }
}

/// Typing delay before a reply: 500ms plus 30-60ms per character, at most 3s
pub fn simulate_typing_delay(text: &str) -> Duration {
    let per_char: f64 = rand::thread_rng().gen_range(30.0..60.0);
    let millis = (500.0 + text.chars().count() as f64 * per_char).min(3000.0);
    Duration::from_millis(millis as u64)
}

fn pick(locale: Locale, en: &'static str, id: &'static str) -> &'static str {
    match locale {
        Locale::En => en,
        Locale::Id => id,
    }
}

fn no_example(locale: Locale) -> &'static str {
    pick(locale, NO_EXAMPLE_EN, NO_EXAMPLE_ID)
}

const WELCOME_EN: &str = "Hello! I'm Amagi AI, created by Tech Nova Group to assist you with website development and coding academy inquiries. How can I help you today? Feel free to ask a question or select from the suggestions below.";
const WELCOME_ID: &str = "Halo! Saya Amagi AI, dibuat oleh Tech Nova Group untuk membantu Anda dengan pertanyaan seputar pengembangan website dan akademi coding. Bagaimana saya bisa membantu Anda hari ini? Silakan ajukan pertanyaan atau pilih dari saran di bawah.";

const GREETING_EN: &str = "Hello! As Amagi AI from Tech Nova Group, I'm here to help you with website development or coding academy questions. What would you like to know?";
const GREETING_ID: &str = "Halo! Sebagai Amagi AI dari Tech Nova Group, saya di sini untuk membantu Anda dengan pertanyaan seputar pengembangan website atau akademi coding. Apa yang ingin Anda ketahui?";

const THANKS_EN: &str = "You're welcome! As Tech Nova Group's AI assistant, I'm always here to help. Feel free to ask more questions!";
const THANKS_ID: &str = "Sama-sama! Sebagai asisten AI Tech Nova Group, saya selalu siap membantu. Jangan ragu untuk bertanya lagi!";

const CASUAL_ACK_EN: &str = "Sure thing! I'll keep my responses more casual and friendly while still representing Tech Nova Group professionally. What would you like to know about our website development or coding academy?";
const CASUAL_ACK_ID: &str = "Tentu saja! Saya akan menjawab dengan lebih santai dan ramah sambil tetap mewakili Tech Nova Group secara profesional. Apa yang ingin Anda ketahui tentang pengembangan website atau akademi coding kami?";

const NO_EXAMPLE_EN: &str = "I don't have a specific code example for that request, but I can help explain the concept.";
const NO_EXAMPLE_ID: &str = "Saya tidak memiliki contoh kode spesifik untuk permintaan tersebut, tetapi saya dapat membantu menjelaskan konsepnya.";

pub const APOLOGY_EN: &str = "I apologize, but I'm having trouble generating a response right now. As Amagi AI from Tech Nova Group, I'd be happy to help you with specific questions about our services or programs.";
pub const APOLOGY_ID: &str = "Maaf, saya sedang mengalami kesulitan menghasilkan respons. Sebagai Amagi AI dari Tech Nova Group, saya dengan senang hati akan membantu Anda dengan pertanyaan spesifik tentang layanan atau program kami.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::tests::{serve_once, test_config};
    use crate::ai::GeminiClient;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned generator that counts how often it was asked
    struct Canned {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn ok(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _question: &str, _locale: Locale) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .map(str::to_string)
                .ok_or_else(|| anyhow!("generator offline"))
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn store() -> Arc<ContentStore> {
        Arc::new(ContentStore::builtin().unwrap())
    }

    fn composer(generator: Arc<dyn TextGenerator>) -> Composer {
        Composer::new(store(), generator)
    }

    #[tokio::test]
    async fn academy_pricing_in_indonesian() {
        let c = composer(Canned::ok("unused"));
        let mut state = ChatState::new();

        assert!(c.send(&mut state, "Berapa biaya bootcamp coding?").await);

        let expected = c.store().answer("academy-pricing", Locale::Id).unwrap();
        let reply = state.last_bot_message().unwrap();
        assert_eq!(reply.content, expected);
        assert!(!reply.is_code);
        assert_eq!(state.locale(), Locale::Id);
        assert!(!state.is_typing());
    }

    #[tokio::test]
    async fn react_example_is_a_code_reply() {
        let generator = Canned::ok("unused");
        let c = composer(generator.clone());
        let mut state = ChatState::new();

        c.send(&mut state, "show me a react component example").await;

        let expected = c.store().answer("code-react-example", Locale::En).unwrap();
        let reply = state.last_bot_message().unwrap();
        assert_eq!(reply.content, expected);
        assert!(reply.is_code);
        assert_eq!(reply.language.as_deref(), Some("javascript"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn code_request_without_snippet_apologises() {
        let c = composer(Canned::ok("unused"));
        let mut state = ChatState::new();

        c.send(&mut state, "show me a flutter example").await;

        let reply = state.last_bot_message().unwrap();
        assert_eq!(reply.content, NO_EXAMPLE_EN);
        assert!(!reply.is_code);
    }

    #[tokio::test]
    async fn server_error_yields_one_apology() {
        let (url, _server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let c = composer(Arc::new(GeminiClient::new(&test_config(&url))));
        let mut state = ChatState::new();

        c.send(&mut state, "What is the weather on Mars?").await;

        assert_eq!(state.messages().len(), 2);
        let reply = state.last_bot_message().unwrap();
        assert_eq!(reply.content, APOLOGY_EN);
        assert!(!state.is_typing());
    }

    #[tokio::test]
    async fn apology_follows_the_detected_locale() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();

        c.send(&mut state, "Siapa yang menang pemilu tahun itu?").await;

        assert_eq!(state.last_bot_message().unwrap().content, APOLOGY_ID);
    }

    #[tokio::test]
    async fn blank_input_changes_nothing() {
        let c = composer(Canned::ok("unused"));
        let mut state = ChatState::new();

        assert!(!c.send(&mut state, "   ").await);
        assert!(!c.send(&mut state, "").await);
        assert!(state.messages().is_empty());
        assert!(!state.is_typing());
        assert!(state.show_suggestions());
    }

    #[tokio::test]
    async fn unmatched_question_goes_to_generator() {
        let generator = Canned::ok("Rust is a systems language.");
        let c = composer(generator.clone());
        let mut state = ChatState::new();

        c.send(&mut state, "Explain borrow checking").await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            state.last_bot_message().unwrap().content,
            "Rust is a systems language."
        );
    }

    #[tokio::test]
    async fn greeting_and_thanks_are_canned() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();

        c.send(&mut state, "Hello there").await;
        assert_eq!(state.last_bot_message().unwrap().content, GREETING_EN);

        c.send(&mut state, "terima kasih").await;
        // two words, no Indonesian function word: still English
        assert_eq!(state.last_bot_message().unwrap().content, THANKS_EN);
    }

    #[tokio::test]
    async fn casual_request_changes_following_replies() {
        let c = composer(Canned::ok("Our team is small."));
        let mut state = ChatState::new();

        c.send(&mut state, "please be more casual").await;
        assert_eq!(state.last_bot_message().unwrap().content, casualize(CASUAL_ACK_EN, Locale::En));

        c.send(&mut state, "Explain borrow checking").await;
        assert_eq!(
            state.last_bot_message().unwrap().content,
            casualize("Our team is small.", Locale::En)
        );
    }

    #[tokio::test]
    async fn casual_tone_never_touches_snippets() {
        let c = composer(Canned::ok("unused"));
        let mut state = ChatState::new();

        c.send(&mut state, "be more casual").await;
        c.send(&mut state, "give me a python api example").await;

        let expected = c.store().answer("code-python-example", Locale::En).unwrap();
        assert_eq!(state.last_bot_message().unwrap().content, expected);
    }

    #[tokio::test]
    async fn begin_raises_typing_until_finish() {
        let c = composer(Canned::ok("done"));
        let mut state = ChatState::new();

        let turn = c.begin(&mut state, "Explain borrow checking").unwrap();
        assert!(state.is_typing());
        assert!(!state.show_suggestions());
        assert_eq!(state.messages().len(), 1);

        let reply = c.resolve(&turn).await;
        c.finish(&mut state, reply);
        assert!(!state.is_typing());
        assert_eq!(state.messages().len(), 2);
    }

    #[tokio::test]
    async fn suggestion_selection_appends_question_and_answer() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();

        assert!(c.select_suggestion(&mut state, "website-pricing").await);
        let messages = state.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].content,
            c.store().suggestion("website-pricing").unwrap().text.english
        );
        assert_eq!(
            messages[1].content,
            c.store().answer("website-pricing", Locale::En).unwrap()
        );
        assert!(!state.is_typing());
    }

    #[tokio::test]
    async fn code_suggestion_carries_language() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();

        c.select_suggestion(&mut state, "code-html-example").await;
        let reply = state.last_bot_message().unwrap();
        assert!(reply.is_code);
        assert_eq!(reply.language.as_deref(), Some("html"));
    }

    #[tokio::test]
    async fn unknown_suggestion_is_ignored() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();
        assert!(!c.select_suggestion(&mut state, "no-such-question").await);
        assert!(c.begin_suggestion(&mut state, "no-such-question").is_none());
        assert!(state.messages().is_empty());
        assert!(!state.is_typing());
    }

    #[tokio::test]
    async fn suggestion_shows_typing_until_finished() {
        let generator = Canned::failing();
        let c = composer(generator.clone());
        let mut state = ChatState::new();

        let turn = c.begin_suggestion(&mut state, "academy-courses").unwrap();
        assert!(state.is_typing());
        assert!(!state.show_suggestions());
        assert_eq!(state.messages().len(), 1);
        assert_eq!(turn.suggestion.as_deref(), Some("academy-courses"));

        let reply = c.resolve(&turn).await;
        assert!(state.is_typing());
        c.finish(&mut state, reply);

        assert!(!state.is_typing());
        assert_eq!(
            state.last_bot_message().unwrap().content,
            c.store().answer("academy-courses", Locale::En).unwrap()
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn suggestion_waits_for_simulated_delay() {
        let c = composer(Canned::failing()).with_simulated_delay(true);
        let mut state = ChatState::new();

        let turn = c.begin_suggestion(&mut state, "website-timeline").unwrap();
        let started = std::time::Instant::now();
        c.resolve(&turn).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn suggestion_answer_follows_casual_tone() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();

        c.send(&mut state, "be more casual").await;
        c.select_suggestion(&mut state, "website-pricing").await;

        let expected = casualize(c.store().answer("website-pricing", Locale::En).unwrap(), Locale::En);
        assert_eq!(state.last_bot_message().unwrap().content, expected);
    }

    #[test]
    fn toggle_flips_suggestion_visibility() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();
        assert!(state.show_suggestions());
        c.toggle_suggestions(&mut state);
        assert!(!state.show_suggestions());
        c.toggle_suggestions(&mut state);
        assert!(state.show_suggestions());
    }

    #[test]
    fn greet_uses_session_locale() {
        let c = composer(Canned::failing());
        let mut state = ChatState::new();
        c.greet(&mut state);
        assert_eq!(state.messages()[0].content, WELCOME_EN);
    }

    #[test]
    fn typing_delay_is_bounded() {
        let short = simulate_typing_delay("hi");
        assert!(short >= Duration::from_millis(560));
        assert!(short <= Duration::from_millis(620));
        assert_eq!(simulate_typing_delay(&"x".repeat(500)), Duration::from_millis(3000));
    }
}
