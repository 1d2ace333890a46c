//! Styled spans for on-screen prose.
//!
//! The desktop window can't show HTML, so each line goes through
//! `format_line` and the resulting tags are read back into flat spans.
//! Screen and clipboard output therefore share one rule list.

use super::markdown::format_line;

/// Line-level structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Paragraph,
    /// 1 for `#`, 2 for `##`, 3 for `###`
    Heading(u8),
    Quote,
    Bullet,
    Numbered(u32),
}

/// A run of text with one set of inline styles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub code: bool,
    pub link: Option<String>,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub block: Block,
    pub spans: Vec<Span>,
}

impl StyledLine {
    pub fn is_blank(&self) -> bool {
        self.spans.is_empty()
    }
}

pub fn styled_line(line: &str) -> StyledLine {
    let html = format_line(line);
    let mut block = Block::Paragraph;
    let mut style = Span::default();
    let mut spans = Vec::new();
    let mut rest = html.as_str();

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let Some(end) = rest.find('>') else {
                break;
            };
            apply_tag(&rest[1..end], line, &mut style, &mut block);
            rest = &rest[end + 1..];
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        spans.push(Span {
            text: unescape(&rest[..end]),
            ..style.clone()
        });
        rest = &rest[end..];
    }

    StyledLine { block, spans }
}

/// Styled lines for a prose block, blank lines kept as empty lines
pub fn styled_prose(text: &str) -> Vec<StyledLine> {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                StyledLine {
                    block: Block::Paragraph,
                    spans: Vec::new(),
                }
            } else {
                styled_line(line)
            }
        })
        .collect()
}

fn apply_tag(tag: &str, line: &str, style: &mut Span, block: &mut Block) {
    let (closing, name) = match tag.strip_prefix('/') {
        Some(name) => (true, name),
        None => (false, tag),
    };
    let name = name.split_whitespace().next().unwrap_or_default();

    match name {
        "strong" => style.strong = !closing,
        "em" => style.italic = !closing,
        "u" => style.underline = !closing,
        "s" => style.strike = !closing,
        "code" => style.code = !closing,
        "a" if closing => style.link = None,
        "a" => style.link = href(tag),
        _ if closing => {}
        "h3" => *block = Block::Heading(1),
        "h4" => *block = Block::Heading(2),
        "h5" => *block = Block::Heading(3),
        "blockquote" => *block = Block::Quote,
        "ul" => *block = Block::Bullet,
        "ol" => *block = Block::Numbered(list_number(line)),
        _ => {}
    }
}

fn href(tag: &str) -> Option<String> {
    let start = tag.find("href=\"")? + "href=\"".len();
    let len = tag[start..].find('"')?;
    Some(unescape(&tag[start..start + len]))
}

fn list_number(line: &str) -> u32 {
    line.trim_start()
        .split('.')
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(1)
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
