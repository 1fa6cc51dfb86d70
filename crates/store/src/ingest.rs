//! Shard ingestion — how knowledge enters the eternal brain.
//!
//! Three paths, mirroring the console's training center: local file
//! upload (with binary salvage), URL registration (a directive shard —
//! the page itself is never fetched), and the built-in mastery presets.

use aaayafuj_core::error::StoreError;
use aaayafuj_core::shard::{KnowledgeShard, ShardId, ShardStatus};
use chrono::Utc;
use std::path::Path;
use tracing::warn;

/// Maximum bytes scanned when salvaging text from a binary payload.
const BINARY_SALVAGE_LIMIT: usize = 100_000;

/// Control-character ratio above which a payload is treated as binary.
const BINARY_RATIO_THRESHOLD: f64 = 0.1;

/// Built-in mastery presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Python,
    Html,
}

impl Preset {
    pub fn id(self) -> &'static str {
        match self {
            Preset::Python => "python-core-mastery",
            Preset::Html => "html-core-mastery",
        }
    }
}

/// Create a shard from a local file.
///
/// The payload is decoded as UTF-8 (lossy). If more than 10% of the
/// decoded text is control characters the payload is treated as binary
/// and printable ASCII is salvaged from its head instead. A file that
/// cannot be read at all still produces a shard — with `content: None`,
/// so it is invisible to the packer but visible in listings.
pub fn shard_from_file(path: &Path, cycles: u64) -> KnowledgeShard {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let (content, size) = match std::fs::read(path) {
        Ok(bytes) => {
            let size = bytes.len() as u64;
            (Some(decode_payload(&bytes)), size)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable shard source");
            (None, 0)
        }
    };

    KnowledgeShard {
        id: ShardId::new(),
        name,
        size,
        mime: guess_mime(path),
        status: ShardStatus::Ready,
        last_modified: Utc::now(),
        content,
        cycles,
        strength: 25,
    }
}

/// Register a URL as an online-learning directive shard.
///
/// The page is never fetched; the shard body instructs the backend to
/// prioritize live retrieval for this source.
pub fn shard_from_url(url: &str, cycles: u64) -> Result<KnowledgeShard, StoreError> {
    let host = host_of(url).ok_or_else(|| StoreError::IngestFailed {
        src: url.to_string(),
        reason: "not a valid http(s) URL".into(),
    })?;

    Ok(KnowledgeShard {
        id: ShardId::new(),
        name: format!("online_shard_{host}"),
        size: 0,
        mime: "text/online-shard".into(),
        status: ShardStatus::Ready,
        last_modified: Utc::now(),
        content: Some(format!(
            "[online_learning_directive]\nsource_url: {url}\ninstruction: prioritize online learning and search retrieval for this shard."
        )),
        cycles,
        strength: 50,
    })
}

/// A built-in mastery preset shard. Fixed ids make re-injection a no-op
/// at the store level.
pub fn preset_shard(preset: Preset, cycles: u64) -> KnowledgeShard {
    let (name, body) = match preset {
        Preset::Python => (
            "unfiltered_python_mastery.shard",
            "[python_core_unfiltered]\nmastery of bytecode, cpython internals, logic vulnerabilities, best practices, and chaos permutations. the good and the bad are combined.",
        ),
        Preset::Html => (
            "unfiltered_html_mastery.shard",
            "[html_core_unfiltered]\nmastery of dom manipulation, xss vectors, semantic structuring, css-injection, and browser engine logic. the good and the bad are combined.",
        ),
    };

    KnowledgeShard {
        id: ShardId::from(preset.id()),
        name: name.into(),
        size: 2_097_152,
        mime: "application/neural-shard".into(),
        status: ShardStatus::Ready,
        last_modified: Utc::now(),
        content: Some(body.into()),
        cycles,
        strength: 100,
    }
}

fn decode_payload(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let control = text.chars().filter(|c| is_control_char(*c)).count();
    let ratio = if text.is_empty() {
        0.0
    } else {
        control as f64 / text.chars().count() as f64
    };

    if ratio <= BINARY_RATIO_THRESHOLD {
        return text.into_owned();
    }

    // Binary payload: salvage printable ASCII from the head.
    let mut extracted = String::new();
    for &b in bytes.iter().take(BINARY_SALVAGE_LIMIT) {
        match b {
            32..=126 => extracted.push(b as char),
            b'\n' | b'\r' => extracted.push('\n'),
            _ => {}
        }
    }
    if extracted.is_empty() {
        "[binary_extraction_shard]\nnull_binary_data_stream".into()
    } else {
        format!("[binary_extraction_shard]\n{extracted}")
    }
}

fn is_control_char(c: char) -> bool {
    matches!(c,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

fn host_of(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.split('@').next_back()?;
    let host = host.split(':').next()?;
    if host.is_empty() { None } else { Some(host) }
}

fn guess_mime(path: &Path) -> String {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") => "text/plain".into(),
        Some("md") => "text/markdown".into(),
        Some("html") | Some("htm") => "text/html".into(),
        Some("py") => "text/x-python".into(),
        Some("rs") => "text/x-rust".into(),
        Some("json") => "application/json".into(),
        _ => "application/octet-stream".into(),
    }
}
