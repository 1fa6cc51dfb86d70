//! Knowledge packing — the budget-constrained context selection core.
//!
//! Given a snapshot of knowledge shards, a character budget, and an entry
//! formatter, produce the ordered, bounded block of knowledge text that a
//! request to the generative backend can carry.
//!
//! # Policy
//!
//! Shards are packed in descending reinforcement order (stable on ties)
//! until the first entry that would overflow the budget; packing then
//! stops outright instead of back-filling remaining slack with smaller,
//! lower-priority shards. Higher-weight shards always win, and partial
//! budget is sacrificed rather than risking out-of-priority-order
//! inclusion. A best-fit pass would use the budget more fully and is a
//! possible future enhancement, but callers depend on the current
//! truncation behavior.
//!
//! # Determinism
//!
//! Packing is a pure function of its inputs: identical snapshot + budget +
//! formatter produce byte-identical output. No I/O, no randomness, no
//! reliance on unordered-container traversal.

use aaayafuj_core::error::PackError;
use aaayafuj_core::shard::{KnowledgeShard, ShardId};
use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

/// Separator between packed entries in the final context block.
pub const ENTRY_SEPARATOR: &str = "\n\n";

/// The result of packing a knowledge snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PackedContext {
    /// Accepted entries, highest reinforcement first.
    pub entries: Vec<String>,

    /// Sum of accepted entry lengths in characters. Separators are not
    /// counted — the budget constrains entry text, as the console always
    /// did.
    pub total_length: usize,

    /// Shards excluded by the budget, in the order they were considered.
    /// Shards without content are not eligible and never appear here.
    pub dropped: Vec<ShardId>,
}

impl PackedContext {
    /// The final context block: entries joined with a blank line.
    pub fn context_block(&self) -> String {
        self.entries.join(ENTRY_SEPARATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pack a snapshot of shards into a budget-constrained context.
///
/// * Shards with absent `content` are excluded before processing and
///   never reported as dropped; a present-but-empty body stays eligible.
/// * Eligible shards are sorted by `cycles` descending; equal counts keep
///   their input order.
/// * An entry is accepted only while `total + len(entry) < budget`
///   (strictly); the first rejection stops packing entirely.
///
/// # Errors
///
/// `PackError::InvalidBudget` if `budget == 0` — a misconfiguration, not
/// an empty result. A formatter failure propagates immediately; there is
/// no partially-packed success.
pub fn pack_knowledge<F>(
    shards: &[KnowledgeShard],
    budget: usize,
    format_entry: F,
) -> Result<PackedContext, PackError>
where
    F: Fn(&KnowledgeShard) -> Result<String, PackError>,
{
    if budget == 0 {
        return Err(PackError::InvalidBudget { budget });
    }

    let mut eligible: Vec<&KnowledgeShard> =
        shards.iter().filter(|s| s.content.is_some()).collect();
    // Stable sort: equal-cycle shards keep snapshot order.
    eligible.sort_by_key(|s| Reverse(s.cycles));

    let mut entries = Vec::new();
    let mut dropped = Vec::new();
    let mut total = 0usize;
    let mut overflowed = false;

    for shard in eligible {
        if overflowed {
            dropped.push(shard.id.clone());
            continue;
        }

        let entry = format_entry(shard)?;
        let len = entry.chars().count();

        if total + len < budget {
            total += len;
            entries.push(entry);
        } else {
            overflowed = true;
            dropped.push(shard.id.clone());
        }
    }

    debug!(
        included = entries.len(),
        dropped = dropped.len(),
        total_chars = total,
        budget,
        "Packed knowledge context"
    );

    Ok(PackedContext {
        entries,
        total_length: total,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aaayafuj_core::shard::ShardId;

    /// Entry = raw body, so lengths in tests are exact.
    fn raw(shard: &KnowledgeShard) -> Result<String, PackError> {
        Ok(shard.content.clone().unwrap_or_default())
    }

    fn shard(name: &str, body_len: usize, cycles: u64) -> KnowledgeShard {
        KnowledgeShard::new(name, "x".repeat(body_len), cycles)
    }

    #[test]
    fn packs_by_weight_then_stops_on_overflow() {
        // Weights [10, 5, 5], 50 chars each, budget 120: the weight-10
        // shard fits (50), the first weight-5 fits (100), remaining
        // budget 20 < 50 so the second weight-5 is dropped.
        let shards = vec![
            shard("heavy", 50, 10),
            shard("mid_a", 50, 5),
            shard("mid_b", 50, 5),
        ];
        let packed = pack_knowledge(&shards, 120, raw).unwrap();

        assert_eq!(packed.entries.len(), 2);
        assert_eq!(packed.total_length, 100);
        assert_eq!(packed.dropped, vec![shards[2].id.clone()]);
    }

    #[test]
    fn empty_snapshot_packs_empty() {
        let packed = pack_knowledge(&[], 1000, raw).unwrap();
        assert!(packed.is_empty());
        assert_eq!(packed.total_length, 0);
        assert!(packed.dropped.is_empty());
        assert_eq!(packed.context_block(), "");
    }

    #[test]
    fn oversized_first_entry_drops_everything() {
        let shards = vec![shard("big", 200, 9)];
        let packed = pack_knowledge(&shards, 100, raw).unwrap();
        assert!(packed.is_empty());
        assert_eq!(packed.dropped.len(), 1);
    }

    #[test]
    fn zero_budget_is_invalid_argument() {
        let shards = vec![shard("a", 1, 1)];
        let err = pack_knowledge(&shards, 0, raw).unwrap_err();
        assert!(matches!(err, PackError::InvalidBudget { budget: 0 }));
    }

    #[test]
    fn equal_weights_keep_input_order() {
        let b = shard("b_first", 10, 7);
        let a = shard("a_second", 10, 7);
        let shards = vec![b, a];

        let packed = pack_knowledge(&shards, 1000, raw).unwrap();
        assert_eq!(packed.entries.len(), 2);
        // Order must match input, not name or id order.
        let named = pack_knowledge(&shards, 1000, |s| Ok(s.name.clone())).unwrap();
        assert_eq!(named.entries, vec!["b_first", "a_second"]);
    }

    #[test]
    fn higher_weight_always_precedes_lower() {
        let shards = vec![
            shard("low", 5, 1),
            shard("high", 5, 1_000_000),
            shard("mid", 5, 500),
        ];
        let packed = pack_knowledge(&shards, 1000, |s| Ok(s.name.clone())).unwrap();
        assert_eq!(packed.entries, vec!["high", "mid", "low"]);
    }

    #[test]
    fn boundary_is_strict() {
        // One 100-char entry against budget 100: 0 + 100 < 100 is false,
        // so it is rejected even though it would land exactly on budget.
        let shards = vec![shard("exact", 100, 1)];
        let packed = pack_knowledge(&shards, 100, raw).unwrap();
        assert!(packed.is_empty());

        // Budget 101 admits it.
        let packed = pack_knowledge(&shards, 101, raw).unwrap();
        assert_eq!(packed.entries.len(), 1);
        assert_eq!(packed.total_length, 100);
    }

    #[test]
    fn stop_on_overflow_skips_smaller_followers() {
        // After "wide" (80 chars) the 30-char follower overflows an
        // 100-char budget; the 5-char shard after it would fit the slack
        // but must be dropped too.
        let shards = vec![
            shard("wide", 80, 100),
            shard("medium", 30, 50),
            shard("tiny", 5, 10),
        ];
        let packed = pack_knowledge(&shards, 100, raw).unwrap();
        assert_eq!(packed.entries.len(), 1);
        assert_eq!(packed.total_length, 80);
        assert_eq!(
            packed.dropped,
            vec![shards[1].id.clone(), shards[2].id.clone()]
        );
    }

    #[test]
    fn contentless_shards_are_invisible() {
        let mut ghost = shard("ghost", 0, 999_999);
        ghost.content = None;
        let present = shard("present", 10, 1);
        let shards = vec![ghost, present];

        let packed = pack_knowledge(&shards, 1000, raw).unwrap();
        assert_eq!(packed.entries.len(), 1);
        // The contentless shard is filtered, not dropped.
        assert!(packed.dropped.is_empty());
    }

    #[test]
    fn empty_string_content_stays_eligible() {
        let empty = shard("empty", 0, 50);
        let shards = vec![empty];
        let packed = pack_knowledge(&shards, 10, raw).unwrap();
        assert_eq!(packed.entries.len(), 1);
        assert_eq!(packed.total_length, 0);
    }

    #[test]
    fn packing_is_deterministic() {
        let shards: Vec<KnowledgeShard> = (0..20)
            .map(|i| shard(&format!("s{i}"), 10 + i as usize, (i % 5) as u64))
            .collect();

        let a = pack_knowledge(&shards, 150, raw).unwrap();
        let b = pack_knowledge(&shards, 150, raw).unwrap();
        assert_eq!(a.context_block(), b.context_block());
        assert_eq!(a.total_length, b.total_length);
        assert_eq!(a.dropped, b.dropped);
    }

    #[test]
    fn formatter_failure_propagates() {
        let shards = vec![shard("bad", 10, 1)];
        let err = pack_knowledge(&shards, 1000, |s| {
            Err(PackError::Format {
                shard: s.id.to_string(),
                reason: "template exploded".into(),
            })
        })
        .unwrap_err();
        assert!(matches!(err, PackError::Format { .. }));
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        // Four snowmen: 4 chars, 12 bytes. A budget of 5 chars admits
        // them under char counting.
        let snow = KnowledgeShard::new("snow", "☃☃☃☃", 1);
        let packed = pack_knowledge(&[snow], 5, raw).unwrap();
        assert_eq!(packed.entries.len(), 1);
        assert_eq!(packed.total_length, 4);
    }

    #[test]
    fn dropped_ids_are_reported_in_priority_order() {
        let shards = vec![shard("a", 60, 9), shard("b", 60, 8), shard("c", 60, 7)];
        let packed = pack_knowledge(&shards, 61, raw).unwrap();
        assert_eq!(packed.entries.len(), 1);
        let dropped: Vec<ShardId> = vec![shards[1].id.clone(), shards[2].id.clone()];
        assert_eq!(packed.dropped, dropped);
    }
}
