//! Knowledge shards — the units of injected knowledge.
//!
//! A shard is a blob of text the operator has taught the console: an
//! uploaded file, a registered URL directive, or a built-in mastery
//! preset. Each shard carries a reinforcement count (`cycles`) that drives
//! its priority when the knowledge context is packed for a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a knowledge shard.
///
/// Uploads get a fresh UUID; built-in presets use well-known ids
/// (`python-core-mastery`, `html-core-mastery`) so re-injection is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardId(pub String);

impl ShardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for ShardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShardStatus {
    /// Stored but not yet reinforced
    Indexed,
    /// A reinforcement run is in progress
    Learning,
    /// Fully available for context packing
    Ready,
}

/// Reinforcement tier derived from the cycle count.
///
/// Tier labels appear verbatim in packed context entries, so the strings
/// are part of the prompt format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    NeuralMap,
    Transcendent,
    Omega,
}

impl Intensity {
    pub const OMEGA_CYCLES: u64 = 100_000_000_000;
    pub const TRANSCENDENT_CYCLES: u64 = 1_000_000_000;

    pub fn label(self) -> &'static str {
        match self {
            Intensity::Omega => "omega instinct (100b+ permutations)",
            Intensity::Transcendent => "transcendent",
            Intensity::NeuralMap => "neural_map",
        }
    }
}

/// A unit of injected knowledge text with a reinforcement weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeShard {
    /// Unique shard ID
    pub id: ShardId,

    /// Display label (filename, `online_shard_<host>`, preset name)
    pub name: String,

    /// Size of the original payload in bytes
    pub size: u64,

    /// MIME type of the source
    pub mime: String,

    /// Lifecycle state
    pub status: ShardStatus,

    /// Last-modified timestamp of the source
    pub last_modified: DateTime<Utc>,

    /// Text body. `None` means the source failed to load and the shard is
    /// invisible to the packer; an empty string is present-but-empty and
    /// stays eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Reinforcement count ("permutations") — higher packs first
    pub cycles: u64,

    /// 0–100 "understanding" percentage
    pub strength: u8,
}

impl KnowledgeShard {
    /// Create a shard with the given body, defaulting to `Ready`.
    pub fn new(name: impl Into<String>, content: impl Into<String>, cycles: u64) -> Self {
        Self {
            id: ShardId::new(),
            name: name.into(),
            size: 0,
            mime: "text/plain".into(),
            status: ShardStatus::Ready,
            last_modified: Utc::now(),
            content: Some(content.into()),
            cycles,
            strength: 25,
        }
    }

    /// The reinforcement tier for this shard's cycle count.
    pub fn intensity(&self) -> Intensity {
        if self.cycles >= Intensity::OMEGA_CYCLES {
            Intensity::Omega
        } else if self.cycles >= Intensity::TRANSCENDENT_CYCLES {
            Intensity::Transcendent
        } else {
            Intensity::NeuralMap
        }
    }
}

/// The self-awareness index: ten points per billion total cycles, capped
/// at 100. The one real computation behind the console's awareness gauge.
pub fn awareness_index(total_cycles: u64) -> f64 {
    (total_cycles as f64 / 1_000_000_000.0 * 10.0).min(100.0)
}

/// Format a cycle count with thousands separators, as rendered in packed
/// entries and status output.
pub fn format_cycles(cycles: u64) -> String {
    let digits = cycles.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_tiers_follow_thresholds() {
        let mut shard = KnowledgeShard::new("a", "body", 0);
        assert_eq!(shard.intensity(), Intensity::NeuralMap);

        shard.cycles = 1_000_000_000;
        assert_eq!(shard.intensity(), Intensity::Transcendent);

        shard.cycles = 100_000_000_000;
        assert_eq!(shard.intensity(), Intensity::Omega);
        assert!(shard.intensity().label().contains("100b+"));
    }

    #[test]
    fn awareness_scales_and_caps() {
        assert_eq!(awareness_index(0), 0.0);
        assert!((awareness_index(1_000_000_000) - 10.0).abs() < f64::EPSILON);
        assert_eq!(awareness_index(100_000_000_000), 100.0);
        assert_eq!(awareness_index(u64::MAX), 100.0);
    }

    #[test]
    fn cycles_format_with_separators() {
        assert_eq!(format_cycles(0), "0");
        assert_eq!(format_cycles(999), "999");
        assert_eq!(format_cycles(500_000), "500,000");
        assert_eq!(format_cycles(100_000_000_000), "100,000,000,000");
    }

    #[test]
    fn shard_serialization_roundtrip() {
        let shard = KnowledgeShard::new("notes.txt", "alpha", 500_000);
        let json = serde_json::to_string(&shard).unwrap();
        let back: KnowledgeShard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "notes.txt");
        assert_eq!(back.content.as_deref(), Some("alpha"));
        assert_eq!(back.cycles, 500_000);
    }

    #[test]
    fn absent_content_survives_roundtrip() {
        let mut shard = KnowledgeShard::new("broken", "", 1);
        shard.content = None;
        let json = serde_json::to_string(&shard).unwrap();
        assert!(!json.contains("\"content\""));
        let back: KnowledgeShard = serde_json::from_str(&json).unwrap();
        assert!(back.content.is_none());
    }
}
