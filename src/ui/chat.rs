/// Message list rendering
use eframe::egui;

use crate::locale::Locale;
use crate::render::{extract_parts, render_html, styled_prose, Block, Part, Span};
use crate::state::{Message, Sender};

pub const BUBBLE_ROUNDING: f32 = 8.0;
pub const CODE_FONT_SIZE: f32 = 13.0;
const HEADING_SIZES: [f32; 3] = [19.0, 17.0, 15.5];

const USER_FILL: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const BOT_FILL: egui::Color32 = egui::Color32::from_rgb(243, 244, 246);
const CODE_FILL: egui::Color32 = egui::Color32::from_rgb(30, 30, 36);

/// What the user clicked inside a bubble
pub enum BubbleAction {
    CopyText(String),
}

/// Draws one message bubble. `visible` is the part of the content revealed
/// so far, the full content once the typewriter is done.
pub fn draw_message(
    ui: &mut egui::Ui,
    message: &Message,
    visible: &str,
    animating: bool,
    bot_name: &str,
) -> Option<BubbleAction> {
    let is_user = message.sender == Sender::User;
    let layout = if is_user {
        egui::Layout::right_to_left(egui::Align::Min)
    } else {
        egui::Layout::left_to_right(egui::Align::Min)
    };

    let mut action = None;
    ui.with_layout(layout, |ui| {
        let max_width = ui.available_width() * 0.85;
        let (fill, text_color) = if is_user {
            (USER_FILL, egui::Color32::WHITE)
        } else {
            (BOT_FILL, egui::Color32::from_rgb(31, 41, 55))
        };

        egui::Frame::NONE
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    let who = if is_user { "You" } else { bot_name };
                    ui.label(
                        egui::RichText::new(format!("{} · {}", who, message.timestamp.format("%H:%M")))
                            .small()
                            .color(text_color.gamma_multiply(0.7)),
                    );

                    // Raw text while the reveal is running
                    if animating {
                        ui.label(egui::RichText::new(visible).color(text_color));
                        return;
                    }

                    action = draw_parts(ui, message, text_color);
                });
            });
    });
    ui.add_space(6.0);
    action
}

fn draw_parts(ui: &mut egui::Ui, message: &Message, text_color: egui::Color32) -> Option<BubbleAction> {
    let mut action = None;

    for part in extract_parts(&message.content) {
        match part {
            Part::Text(text) => {
                let text = text.trim_matches('\n');
                if !text.trim().is_empty() {
                    draw_prose(ui, text, text_color);
                }
            }
            Part::Code { language, body } => {
                let language = language.or_else(|| message.language.clone());
                if let Some(copied) = draw_code(ui, language.as_deref(), &body) {
                    action = Some(copied);
                }
            }
        }
    }

    if message.is_bot() {
        ui.horizontal(|ui| {
            if ui.small_button("Copy HTML").clicked() {
                action = Some(BubbleAction::CopyText(render_html(message)));
            }
        });
    }
    action
}

fn draw_prose(ui: &mut egui::Ui, text: &str, text_color: egui::Color32) {
    for line in styled_prose(text) {
        if line.is_blank() {
            ui.add_space(6.0);
            continue;
        }
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            let marker = match line.block {
                Block::Bullet => Some("•  ".to_string()),
                Block::Numbered(n) => Some(format!("{}. ", n)),
                Block::Quote => Some("▎ ".to_string()),
                Block::Paragraph | Block::Heading(_) => None,
            };
            if let Some(marker) = marker {
                ui.label(egui::RichText::new(marker).color(text_color.gamma_multiply(0.7)));
            }
            for span in &line.spans {
                let text = span_text(span, line.block, text_color);
                match &span.link {
                    Some(url) => {
                        ui.hyperlink_to(text, url);
                    }
                    None => {
                        ui.label(text);
                    }
                }
            }
        });
    }
}

fn span_text(span: &Span, block: Block, text_color: egui::Color32) -> egui::RichText {
    let mut text = egui::RichText::new(&span.text).color(text_color);
    match block {
        Block::Heading(level) => {
            let size = HEADING_SIZES[usize::from(level.clamp(1, 3)) - 1];
            text = text.size(size).strong();
        }
        Block::Quote => text = text.italics(),
        _ => {}
    }
    if span.strong {
        text = text.strong();
    }
    if span.italic {
        text = text.italics();
    }
    if span.underline || span.link.is_some() {
        text = text.underline();
    }
    if span.strike {
        text = text.strikethrough();
    }
    if span.code {
        text = text.code();
    }
    text
}

fn draw_code(ui: &mut egui::Ui, language: Option<&str>, body: &str) -> Option<BubbleAction> {
    let mut action = None;
    egui::Frame::NONE
        .fill(CODE_FILL)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(language.unwrap_or("code"))
                        .small()
                        .color(egui::Color32::LIGHT_GRAY),
                );
                if ui.small_button("📋").on_hover_text("Copy code").clicked() {
                    action = Some(BubbleAction::CopyText(body.to_string()));
                }
            });
            ui.label(
                egui::RichText::new(body)
                    .monospace()
                    .size(CODE_FONT_SIZE)
                    .color(egui::Color32::from_rgb(220, 220, 220)),
            );
        });
    action
}

/// Placeholder bubble shown while a reply is being prepared
pub fn draw_typing_indicator(ui: &mut egui::Ui, bot_name: &str, locale: Locale) {
    let text = match locale {
        Locale::En => format!("{} is typing…", bot_name),
        Locale::Id => format!("{} sedang mengetik…", bot_name),
    };
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new(text).italics().weak());
    });
}
