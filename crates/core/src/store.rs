//! Store traits — explicit, injectable repositories for console state.
//!
//! Each store owns one small JSON-serializable state blob (knowledge base,
//! memory stream, package registry, theme) with load-on-start /
//! write-on-mutation semantics. Implementations live in `aaayafuj-store`:
//! file-backed for real runs, in-memory for tests.

use crate::error::StoreError;
use crate::message::{Message, Transcript};
use crate::package::AiPackage;
use crate::shard::{KnowledgeShard, ShardId, ShardStatus};
use crate::theme::ThemeConfig;
use crate::voice::VoiceProfile;
use async_trait::async_trait;

/// The knowledge base ("eternal brain").
///
/// `list()` must return shards in stable insertion order — the packer's
/// tie-breaking depends on it.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// A human-readable name for this backend.
    fn name(&self) -> &str;

    /// Insert a shard. Inserting an id that already exists is a no-op and
    /// returns the existing id (preset re-injection).
    async fn add(&self, shard: KnowledgeShard) -> Result<ShardId, StoreError>;

    async fn get(&self, id: &ShardId) -> Result<Option<KnowledgeShard>, StoreError>;

    /// All shards, in insertion order.
    async fn list(&self) -> Result<Vec<KnowledgeShard>, StoreError>;

    /// Set a shard's cycle count and strength. Cycles only ever grow;
    /// implementations keep the larger of old and new.
    async fn reinforce(&self, id: &ShardId, cycles: u64, strength: u8) -> Result<(), StoreError>;

    async fn set_status(&self, id: &ShardId, status: ShardStatus) -> Result<(), StoreError>;

    /// Remove a shard. Returns whether anything was deleted.
    async fn delete(&self, id: &ShardId) -> Result<bool, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// Sum of all shard cycle counts ("total permutations").
    async fn total_cycles(&self) -> Result<u64, StoreError>;
}

/// The persisted memory stream.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Load the transcript; a fresh store yields the seeded greeting.
    async fn load(&self) -> Result<Transcript, StoreError>;

    async fn append(&self, message: Message) -> Result<(), StoreError>;

    async fn replace(&self, transcript: Transcript) -> Result<(), StoreError>;

    /// Reset to the seeded greeting.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// The package registry.
#[async_trait]
pub trait PackageStore: Send + Sync {
    /// All packages; a fresh store yields the built-in registry.
    async fn list(&self) -> Result<Vec<AiPackage>, StoreError>;

    /// Insert or update a package by id.
    async fn upsert(&self, package: AiPackage) -> Result<(), StoreError>;
}

/// Theme persistence.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    async fn load(&self) -> Result<ThemeConfig, StoreError>;

    async fn save(&self, theme: &ThemeConfig) -> Result<(), StoreError>;
}

/// Voice-profile persistence.
#[async_trait]
pub trait VoiceStore: Send + Sync {
    async fn load(&self) -> Result<VoiceProfile, StoreError>;

    async fn save(&self, profile: &VoiceProfile) -> Result<(), StoreError>;
}
