//! Presentation transforms. Nothing in here touches conversation state.

mod markdown;
mod styled;
mod typing;

pub use markdown::{escape_html, extract_parts, format_line, format_prose, Part};
pub use styled::{styled_line, styled_prose, Block, Span, StyledLine};
pub use typing::Typewriter;

use crate::state::Message;

/// HTML fragment for `text`, with fenced code rendered as `<pre><code>`
pub fn render_text_html(text: &str, default_language: Option<&str>) -> String {
    extract_parts(text)
        .into_iter()
        .map(|part| match part {
            Part::Text(prose) => {
                let prose = prose.trim_matches('\n');
                if prose.trim().is_empty() {
                    String::new()
                } else {
                    format_prose(prose)
                }
            }
            Part::Code { language, body } => {
                let language = language.as_deref().or(default_language);
                match language {
                    Some(lang) => format!(
                        "<pre><code class=\"language-{}\">{}</code></pre>",
                        escape_html(lang),
                        escape_html(&body)
                    ),
                    None => format!("<pre><code>{}</code></pre>", escape_html(&body)),
                }
            }
        })
        .filter(|html| !html.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_html(message: &Message) -> String {
    render_text_html(&message.content, message.language.as_deref())
}
