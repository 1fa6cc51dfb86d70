//! Tokenizer and renderer for the console's markdown-like reply syntax.
//!
//! Replies from the backend use a small line-based dialect: `#`/`##`/`###`
//! headings, `MODE_X:` banners, `* ` list items, `> ` quotes, and five
//! inline span kinds (`[tag]`, `**bold**`, `|highlight|`, `` `code` ``,
//! `*italic*`). Parsing is a two-stage pipeline — a line classifier and an
//! ordered inline rule list — so rule ordering and escaping stay explicit
//! and testable.

pub mod block;
pub mod inline;
pub mod render;

pub use block::{Block, parse_blocks};
pub use inline::{Inline, parse_inline};
pub use render::{render_text, speech_excerpt, strip_modes};
