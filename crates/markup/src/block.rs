//! Line-level block classification.

use crate::inline::{Inline, parse_inline};

/// A classified line of reply text.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A `MODE_X:` banner line; carries the mode label.
    ModeBanner(String),

    /// `# ` / `## ` / `### ` heading; level is 1–3.
    Heading { level: u8, text: String },

    /// `* ` bullet.
    ListItem(Vec<Inline>),

    /// `> ` quote.
    Quote(Vec<Inline>),

    /// Empty line.
    Blank,

    /// Anything else.
    Paragraph(Vec<Inline>),
}

/// Classify reply text line by line.
///
/// Matches the console's rendering order: mode banners win over headings,
/// and `### ` is checked before `## ` so the longer prefix is not
/// shadowed. Lines are trimmed before classification.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    content.lines().map(classify_line).collect()
}

fn classify_line(line: &str) -> Block {
    let trimmed = line.trim();

    if trimmed.starts_with("MODE_") {
        let mode = trimmed.split(':').next().unwrap_or(trimmed);
        return Block::ModeBanner(mode.to_string());
    }

    if let Some(text) = trimmed.strip_prefix("# ") {
        return Block::Heading {
            level: 1,
            text: text.to_string(),
        };
    }

    if let Some(text) = trimmed.strip_prefix("### ") {
        return Block::Heading {
            level: 3,
            text: text.to_string(),
        };
    }

    if let Some(text) = trimmed.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            text: text.to_string(),
        };
    }

    if let Some(text) = trimmed.strip_prefix("* ") {
        return Block::ListItem(parse_inline(text));
    }

    if let Some(text) = trimmed.strip_prefix("> ") {
        return Block::Quote(parse_inline(text));
    }

    if trimmed.is_empty() {
        return Block::Blank;
    }

    Block::Paragraph(parse_inline(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_by_prefix() {
        let blocks = parse_blocks("# big\n## medium\n### small");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "big".into() },
                Block::Heading { level: 2, text: "medium".into() },
                Block::Heading { level: 3, text: "small".into() },
            ]
        );
    }

    #[test]
    fn mode_banner_wins_over_everything() {
        let blocks = parse_blocks("MODE_LOGIC: raw atomic derivation");
        assert_eq!(blocks, vec![Block::ModeBanner("MODE_LOGIC".into())]);
    }

    #[test]
    fn tagged_h3_keeps_bracket_text() {
        let blocks = parse_blocks("### [ready for owner command]");
        assert_eq!(
            blocks,
            vec![Block::Heading { level: 3, text: "[ready for owner command]".into() }]
        );
    }

    #[test]
    fn list_quote_blank_paragraph() {
        let blocks = parse_blocks("* item one\n> a quote\n\nplain text");
        assert!(matches!(blocks[0], Block::ListItem(_)));
        assert!(matches!(blocks[1], Block::Quote(_)));
        assert_eq!(blocks[2], Block::Blank);
        assert!(matches!(blocks[3], Block::Paragraph(_)));
    }

    #[test]
    fn leading_whitespace_is_ignored() {
        let blocks = parse_blocks("   ## indented heading");
        assert_eq!(
            blocks,
            vec![Block::Heading { level: 2, text: "indented heading".into() }]
        );
    }

    #[test]
    fn bare_hash_is_a_paragraph() {
        // No trailing space after '#': not a heading.
        let blocks = parse_blocks("#hashtag");
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }
}
