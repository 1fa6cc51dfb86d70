//! Inline span tokenization.
//!
//! Spans are extracted by an ordered rule list; each rule only splits the
//! plain-text remainder left by earlier rules, so `**bold**` is consumed
//! before the single-`*` italic rule can see it. Unterminated markers stay
//! literal text.

use regex_lite::Regex;
use std::sync::OnceLock;

/// An inline span of reply text.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// `[tag]` — status/protocol chips like `[ready for owner command]`.
    Tag(String),
    /// `**bold**`
    Bold(String),
    /// `|highlight|`
    Highlight(String),
    /// `` `code` ``
    Code(String),
    /// `*italic*`
    Italic(String),
    /// Plain text.
    Text(String),
}

impl Inline {
    /// The span's inner text, markers removed.
    pub fn text(&self) -> &str {
        match self {
            Inline::Tag(t)
            | Inline::Bold(t)
            | Inline::Highlight(t)
            | Inline::Code(t)
            | Inline::Italic(t)
            | Inline::Text(t) => t,
        }
    }
}

struct Rule {
    pattern: &'static Regex,
    /// How many marker chars to trim from each side of a match.
    trim: usize,
    build: fn(String) -> Inline,
}

fn rules() -> &'static [Rule; 5] {
    static RULES: OnceLock<[Rule; 5]> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static HIGHLIGHT: OnceLock<Regex> = OnceLock::new();
    static CODE: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();

    RULES.get_or_init(|| {
        [
            Rule {
                pattern: TAG.get_or_init(|| Regex::new(r"\[[^\[\]]*\]").unwrap()),
                trim: 1,
                build: Inline::Tag,
            },
            Rule {
                pattern: BOLD.get_or_init(|| Regex::new(r"\*\*[^*]*\*\*").unwrap()),
                trim: 2,
                build: Inline::Bold,
            },
            Rule {
                pattern: HIGHLIGHT.get_or_init(|| Regex::new(r"\|[^|]*\|").unwrap()),
                trim: 1,
                build: Inline::Highlight,
            },
            Rule {
                pattern: CODE.get_or_init(|| Regex::new(r"`[^`]*`").unwrap()),
                trim: 1,
                build: Inline::Code,
            },
            Rule {
                pattern: ITALIC.get_or_init(|| Regex::new(r"\*[^*]+\*").unwrap()),
                trim: 1,
                build: Inline::Italic,
            },
        ]
    })
}

/// Tokenize one line's worth of text into inline spans.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = vec![Inline::Text(text.to_string())];

    for rule in rules() {
        spans = spans
            .into_iter()
            .flat_map(|span| match span {
                Inline::Text(t) => apply_rule(&t, rule),
                other => vec![other],
            })
            .collect();
    }

    // Drop empty text fragments left between adjacent spans.
    spans.retain(|s| !matches!(s, Inline::Text(t) if t.is_empty()));
    spans
}

fn apply_rule(text: &str, rule: &Rule) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut last = 0;

    for m in rule.pattern.find_iter(text) {
        if m.start() > last {
            out.push(Inline::Text(text[last..m.start()].to_string()));
        }
        let inner = &m.as_str()[rule.trim..m.as_str().len() - rule.trim];
        out.push((rule.build)(inner.to_string()));
        last = m.end();
    }

    if last < text.len() {
        out.push(Inline::Text(text[last..].to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            parse_inline("just words"),
            vec![Inline::Text("just words".into())]
        );
    }

    #[test]
    fn extracts_each_span_kind() {
        let spans = parse_inline("[ok] **hard** |hot| `fn` *soft*");
        assert_eq!(
            spans,
            vec![
                Inline::Tag("ok".into()),
                Inline::Text(" ".into()),
                Inline::Bold("hard".into()),
                Inline::Text(" ".into()),
                Inline::Highlight("hot".into()),
                Inline::Text(" ".into()),
                Inline::Code("fn".into()),
                Inline::Text(" ".into()),
                Inline::Italic("soft".into()),
            ]
        );
    }

    #[test]
    fn bold_is_consumed_before_italic() {
        let spans = parse_inline("**strong** and *light*");
        assert_eq!(spans[0], Inline::Bold("strong".into()));
        assert_eq!(spans[2], Inline::Italic("light".into()));
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(
            parse_inline("a [dangling tag"),
            vec![Inline::Text("a [dangling tag".into())]
        );
        assert_eq!(
            parse_inline("**half bold"),
            vec![Inline::Text("**half bold".into())]
        );
    }

    #[test]
    fn tag_beats_inner_styles() {
        // Rule order: the bracket rule runs first, so markers inside a
        // tag are not re-tokenized.
        let spans = parse_inline("[self_reflection *active*]");
        assert_eq!(spans, vec![Inline::Tag("self_reflection *active*".into())]);
    }

    #[test]
    fn adjacent_spans_without_gaps() {
        let spans = parse_inline("`a``b`");
        assert_eq!(
            spans,
            vec![Inline::Code("a".into()), Inline::Code("b".into())]
        );
    }

    #[test]
    fn empty_spans_are_kept_as_spans() {
        // `**` alone is an empty... not matched (needs 4 stars); but an
        // empty tag is a real, empty chip.
        let spans = parse_inline("[]");
        assert_eq!(spans, vec![Inline::Tag(String::new())]);
    }
}
