//! Fenced code extraction and markdown-ish prose formatting.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A slice of a message: prose or a fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Code {
        language: Option<String>,
        body: String,
    },
}

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+#.-]*)[ \t]*\r?\n(.*?)```").expect("fence pattern")
});

/// Splits `text` into prose and code parts in order of appearance.
/// A fence that is never closed stays prose.
pub fn extract_parts(text: &str) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut last = 0;

    for caps in FENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            parts.push(Part::Text(text[last..whole.start()].to_string()));
        }
        let language = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let body = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        parts.push(Part::Code {
            language,
            body: body.to_string(),
        });
        last = whole.end();
    }

    if last < text.len() {
        parts.push(Part::Text(text[last..].to_string()));
    }
    parts
}

struct FormatRule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> FormatRule {
    FormatRule {
        pattern: Regex::new(pattern).expect("format rule pattern"),
        replacement,
    }
}

// Applied top to bottom on an already HTML-escaped line. None of the
// inserted tags contain a marker character, so later rules can't re-match
// earlier output.
static FORMAT_RULES: LazyLock<Vec<FormatRule>> = LazyLock::new(|| {
    vec![
        // bold
        rule(r"\*\*(.*?)\*\*", "<strong>$1</strong>"),
        // italic
        rule(r"\*(.*?)\*", "<em>$1</em>"),
        // underline
        rule(r"__(.*?)__", "<u>$1</u>"),
        // strikethrough
        rule(r"~~(.*?)~~", "<s>$1</s>"),
        // headers
        rule(r"^#\s(.*)", "<h3>$1</h3>"),
        rule(r"^##\s(.*)", "<h4>$1</h4>"),
        rule(r"^###\s(.*)", "<h5>$1</h5>"),
        // block quote, the `>` was escaped above
        rule(r"^&gt;\s(.*)", "<blockquote>$1</blockquote>"),
        // lists
        rule(r"^[*-]\s(.*)", "<ul><li>$1</li></ul>"),
        rule(r"^\d+\.\s(.*)", "<ol><li>$1</li></ol>"),
    ]
});

// Inline code and links are cut out into numbered slots before the marker
// rules run, then put back. Code bodies and URLs are never rewritten.
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("inline code pattern"));
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]\((https?://[^\s)]+)\)").expect("link pattern")
});
static SLOT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}(\\d+)\u{E000}").expect("slot pattern"));

const SLOT: char = '\u{E000}';

fn protect<F>(pattern: &Regex, text: &str, slots: &mut Vec<String>, render: F) -> String
where
    F: Fn(&Captures) -> String,
{
    pattern
        .replace_all(text, |caps: &Captures| {
            slots.push(render(caps));
            format!("{}{}{}", SLOT, slots.len() - 1, SLOT)
        })
        .into_owned()
}

fn restore(text: &str, slots: &[String]) -> String {
    let mut out = text.to_string();
    // a link label may hold a code slot, so slots can nest
    for _ in 0..=slots.len() {
        if !out.contains(SLOT) {
            break;
        }
        out = SLOT_REF
            .replace_all(&out, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| slots.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned();
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a single prose line
pub fn format_line(line: &str) -> String {
    let escaped = escape_html(&line.replace(SLOT, ""));
    let mut slots = Vec::new();

    let text = protect(&INLINE_CODE, &escaped, &mut slots, |caps| {
        format!("<code>{}</code>", &caps[1])
    });
    let text = protect(&LINK, &text, &mut slots, |caps| {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            &caps[2], &caps[1]
        )
    });

    let formatted = FORMAT_RULES.iter().fold(text, |acc, r| {
        r.pattern.replace_all(&acc, r.replacement).into_owned()
    });
    restore(&formatted, &slots)
}

/// Formats prose line by line, blank lines become `<br>`
pub fn format_prose(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                "<br>".to_string()
            } else {
                format!("<span>{}</span>", format_line(line))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squash(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn extracts_code_in_order() {
        let text = "Intro\n```javascript\nlet a = 1;\n```\nmiddle\n```html\n<p></p>\n```";
        let parts = extract_parts(text);
        assert_eq!(
            parts,
            vec![
                Part::Text("Intro\n".to_string()),
                Part::Code {
                    language: Some("javascript".to_string()),
                    body: "let a = 1;".to_string(),
                },
                Part::Text("\nmiddle\n".to_string()),
                Part::Code {
                    language: Some("html".to_string()),
                    body: "<p></p>".to_string(),
                },
            ]
        );
    }

    #[test]
    fn fence_without_language() {
        let parts = extract_parts("```\nplain\n```");
        assert_eq!(
            parts,
            vec![Part::Code {
                language: None,
                body: "plain".to_string(),
            }]
        );
    }

    #[test]
    fn unclosed_fence_stays_prose() {
        let text = "look ```python\nprint(1)";
        assert_eq!(extract_parts(text), vec![Part::Text(text.to_string())]);
    }

    #[test]
    fn no_fences_single_text_part() {
        assert_eq!(extract_parts("hello"), vec![Part::Text("hello".to_string())]);
        assert!(extract_parts("").is_empty());
    }

    #[test]
    fn parts_reassemble_to_original_without_fences() {
        let text = "Here you go:\n\n```python\ndef f():\n    return 1\n```\nEnjoy!\n```js\nf()\n```";
        let rebuilt: String = extract_parts(text)
            .into_iter()
            .map(|p| match p {
                Part::Text(t) => t,
                Part::Code { body, .. } => format!("\n{}\n", body),
            })
            .collect();
        let without_fences = text.replace("```python", "").replace("```js", "").replace("```", "");
        assert_eq!(squash(&rebuilt), squash(&without_fences));
    }

    #[test]
    fn inline_markers() {
        assert_eq!(format_line("**bold** and *it*"), "<strong>bold</strong> and <em>it</em>");
        assert_eq!(format_line("__under__ ~~gone~~"), "<u>under</u> <s>gone</s>");
        assert_eq!(format_line("run `cargo`"), "run <code>cargo</code>");
    }

    #[test]
    fn block_markers() {
        assert_eq!(format_line("# Title"), "<h3>Title</h3>");
        assert_eq!(format_line("## Sub"), "<h4>Sub</h4>");
        assert_eq!(format_line("### Small"), "<h5>Small</h5>");
        assert_eq!(format_line("> quoted"), "<blockquote>quoted</blockquote>");
        assert_eq!(format_line("- item"), "<ul><li>item</li></ul>");
        assert_eq!(format_line("2. second"), "<ol><li>second</li></ol>");
    }

    #[test]
    fn links_are_rendered() {
        assert_eq!(
            format_line("see [docs](https://www.tngdemy.id/)"),
            r#"see <a href="https://www.tngdemy.id/" target="_blank" rel="noopener noreferrer">docs</a>"#
        );
    }

    #[test]
    fn link_urls_are_left_alone() {
        assert_eq!(
            format_line("see [init](https://example.com/__init__.py)"),
            r#"see <a href="https://example.com/__init__.py" target="_blank" rel="noopener noreferrer">init</a>"#
        );
        assert_eq!(
            format_line("[q](https://example.com/a*b*c) and *this*"),
            r#"<a href="https://example.com/a*b*c" target="_blank" rel="noopener noreferrer">q</a> and <em>this</em>"#
        );
    }

    #[test]
    fn inline_code_keeps_its_markers() {
        assert_eq!(format_line("Use `**kwargs`"), "Use <code>**kwargs</code>");
        assert_eq!(
            format_line("`[x](https://a.io)` stays text"),
            "<code>[x](https://a.io)</code> stays text"
        );
    }

    #[test]
    fn code_inside_link_label() {
        assert_eq!(
            format_line("[`cargo`](https://doc.rust-lang.org/cargo/)"),
            r#"<a href="https://doc.rust-lang.org/cargo/" target="_blank" rel="noopener noreferrer"><code>cargo</code></a>"#
        );
    }

    #[test]
    fn slot_marker_in_input_is_dropped() {
        assert_eq!(format_line("a\u{E000}0\u{E000}b"), "a0b");
    }

    #[test]
    fn raw_html_is_escaped() {
        assert_eq!(format_line("<script>x</script>"), "&lt;script&gt;x&lt;/script&gt;");
    }

    #[test]
    fn inserted_markup_is_not_rematched() {
        // bold output must survive the italic rule untouched
        let once = format_line("**a** b");
        assert_eq!(once, "<strong>a</strong> b");
        assert!(!once.contains("<em>"));
    }

    #[test]
    fn prose_blank_lines_become_breaks() {
        assert_eq!(
            format_prose("one\n\n**two**"),
            "<span>one</span>\n<br>\n<span><strong>two</strong></span>"
        );
    }
}
