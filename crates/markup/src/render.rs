//! Plain-text rendering and reply-cleaning helpers.

use crate::block::{Block, parse_blocks};
use crate::inline::Inline;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Render reply markup as plain terminal text: markers are dropped,
/// headings are uppercased, list items and quotes keep simple prefixes.
pub fn render_text(content: &str) -> String {
    let mut out = String::new();

    for block in parse_blocks(content) {
        match block {
            Block::ModeBanner(mode) => {
                out.push_str(&format!("[{mode}]"));
            }
            Block::Heading { text, .. } => {
                out.push_str(&text.to_uppercase());
            }
            Block::ListItem(spans) => {
                out.push_str("  - ");
                push_spans(&mut out, &spans);
            }
            Block::Quote(spans) => {
                out.push_str("  > ");
                push_spans(&mut out, &spans);
            }
            Block::Blank => {}
            Block::Paragraph(spans) => {
                push_spans(&mut out, &spans);
            }
        }
        out.push('\n');
    }

    out
}

fn push_spans(out: &mut String, spans: &[Inline]) {
    for span in spans {
        match span {
            Inline::Tag(t) => {
                out.push('[');
                out.push_str(t);
                out.push(']');
            }
            _ => out.push_str(span.text()),
        }
    }
}

/// Strip mode markers and `### ` prefixes — the clipboard cleaning the
/// console applies before copying a reply.
pub fn strip_modes(text: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"MODE_[A-Z]+:|### \[[^\]]*\]|### ").unwrap());
    re.replace_all(text, "").trim().to_string()
}

/// Reduce a reply to speakable text: drop markup punctuation and truncate
/// to 1000 characters before speech synthesis.
pub fn speech_excerpt(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '_' | '>' | '[' | ']'))
        .take(1000)
        .collect()
}
