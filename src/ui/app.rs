/// Main application structure and lifecycle management
use eframe::egui;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::chat::{self, BubbleAction};
use crate::composer::{Composer, Reply, Turn};
use crate::config::Config;
use crate::content::Category;
use crate::locale::Locale;
use crate::render::Typewriter;
use crate::state::ChatState;

pub struct ChatApp {
    config: Config,
    composer: Arc<Composer>,
    state: ChatState,
    typewriter: Typewriter,
    input_text: String,
    reply_receiver: std_mpsc::Receiver<Reply>,
    reply_sender: std_mpsc::Sender<Reply>,
    last_tick: Instant,
    style_initialized: bool,
}

impl ChatApp {
    pub fn new(config: Config, composer: Composer) -> Self {
        let (reply_sender, reply_receiver) = std_mpsc::channel();
        let mut state = ChatState::new();
        composer.greet(&mut state);

        let mut typewriter = Typewriter::new(config.typing_chars_per_tick);
        if let Some(greeting) = state.last_bot_message() {
            typewriter.track(greeting);
        }

        Self {
            config,
            composer: Arc::new(composer),
            state,
            typewriter,
            input_text: String::new(),
            reply_receiver,
            reply_sender,
            last_tick: Instant::now(),
            style_initialized: false,
        }
    }

    fn send_message(&mut self, ctx: &egui::Context) {
        // One request in flight at a time
        if self.state.is_typing() {
            return;
        }

        let text = std::mem::take(&mut self.input_text);
        if let Some(turn) = self.composer.begin(&mut self.state, &text) {
            self.dispatch(turn, ctx);
        }
    }

    fn select_suggestion(&mut self, id: &str, ctx: &egui::Context) {
        if self.state.is_typing() {
            return;
        }
        if let Some(turn) = self.composer.begin_suggestion(&mut self.state, id) {
            self.dispatch(turn, ctx);
        }
    }

    /// Resolves `turn` on the tokio runtime, the reply comes back through
    /// `poll_replies`
    fn dispatch(&self, turn: Turn, ctx: &egui::Context) {
        let composer = Arc::clone(&self.composer);
        let sender = self.reply_sender.clone();
        let ctx_clone = ctx.clone();

        tokio::spawn(async move {
            let reply = composer.resolve(&turn).await;
            if let Err(e) = sender.send(reply) {
                log::error!("❌ Reply channel closed: {}", e);
            }
            ctx_clone.request_repaint();
        });
    }

    fn track_last_reply(&mut self) {
        if let Some(reply) = self.state.last_bot_message() {
            self.typewriter.track(reply);
        }
    }

    fn poll_replies(&mut self) {
        while let Ok(reply) = self.reply_receiver.try_recv() {
            self.composer.finish(&mut self.state, reply);
            self.track_last_reply();
        }
    }

    fn advance_typewriter(&mut self, ctx: &egui::Context) {
        if self.typewriter.is_done() {
            return;
        }
        let tick = Duration::from_millis(self.config.typing_tick_ms);
        if self.last_tick.elapsed() >= tick {
            self.typewriter.tick();
            self.last_tick = Instant::now();
        }
        ctx.request_repaint_after(tick);
    }

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        let label = match (self.state.show_suggestions(), self.state.locale()) {
            (true, Locale::En) => "Hide suggestions",
            (true, Locale::Id) => "Sembunyikan saran",
            (false, Locale::En) => "Show suggestions",
            (false, Locale::Id) => "Tampilkan saran",
        };
        ui.horizontal(|ui| {
            ui.heading(&self.config.bot_name);
            ui.label(egui::RichText::new("Tech Nova Group").weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button(label).clicked() {
                    self.composer.toggle_suggestions(&mut self.state);
                }
            });
        });
    }

    fn draw_suggestions(&mut self, ui: &mut egui::Ui) {
        if !self.state.show_suggestions() {
            return;
        }
        let locale = self.state.locale();

        let mut picked = None;
        for category in [Category::Website, Category::Academy, Category::Coding] {
            let questions: Vec<_> = self
                .composer
                .store()
                .suggestions()
                .iter()
                .filter(|q| q.category == category)
                .collect();
            if questions.is_empty() {
                continue;
            }
            ui.label(egui::RichText::new(category_title(category, locale)).strong());
            ui.horizontal_wrapped(|ui| {
                for question in questions {
                    let text = question
                        .text
                        .get(locale)
                        .or_else(|| question.text.get(Locale::En))
                        .unwrap_or(question.id.as_str());
                    if ui.button(text).clicked() {
                        picked = Some(question.id.clone());
                    }
                }
            });
        }

        if let Some(id) = picked {
            let ctx = ui.ctx().clone();
            self.select_suggestion(&id, &ctx);
        }
    }
}

fn category_title(category: Category, locale: Locale) -> &'static str {
    match (category, locale) {
        (Category::Website, Locale::En) => "Website development",
        (Category::Website, Locale::Id) => "Pengembangan website",
        (Category::Academy, Locale::En) => "Coding academy",
        (Category::Academy, Locale::Id) => "Akademi coding",
        (Category::Coding, Locale::En) => "Code examples",
        (Category::Coding, Locale::Id) => "Contoh kode",
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.style_initialized {
            ctx.set_visuals(egui::Visuals::light());
            self.style_initialized = true;
        }

        self.poll_replies();
        self.advance_typewriter(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.draw_header(ui);
        });

        egui::TopBottomPanel::bottom("input").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_suggestions(ui);

            let hint = match self.state.locale() {
                Locale::En => "Type your message...",
                Locale::Id => "Ketik pesan Anda...",
            };
            let enabled = !self.state.is_typing();
            let mut send = false;
            ui.horizontal(|ui| {
                let width = ui.available_width() - 60.0;
                let input = ui.add_enabled(
                    enabled,
                    egui::TextEdit::singleline(&mut self.input_text)
                        .hint_text(hint)
                        .desired_width(width),
                );
                if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    send = true;
                    input.request_focus();
                }
                let can_send = enabled && !self.input_text.trim().is_empty();
                if ui.add_enabled(can_send, egui::Button::new("Send")).clicked() {
                    send = true;
                }
            });
            ui.add_space(4.0);

            if send {
                self.send_message(ctx);
            }
        });

        let mut copied = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in self.state.messages() {
                        let visible = self.typewriter.visible(message);
                        let animating = self.typewriter.is_animating(message);
                        if let Some(action) =
                            chat::draw_message(ui, message, visible, animating, &self.config.bot_name)
                        {
                            copied = Some(action);
                        }
                    }
                    if self.state.is_typing() {
                        chat::draw_typing_indicator(ui, &self.config.bot_name, self.state.locale());
                    }
                });
        });

        if let Some(BubbleAction::CopyText(text)) = copied {
            log::debug!("📋 Copied {} bytes", text.len());
            ctx.copy_text(text);
        }
    }
}
