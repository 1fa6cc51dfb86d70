//! In-memory stores — useful for testing and ephemeral sessions.

use aaayafuj_core::error::StoreError;
use aaayafuj_core::message::{Message, Transcript};
use aaayafuj_core::shard::{KnowledgeShard, ShardId, ShardStatus};
use aaayafuj_core::store::{KnowledgeStore, TranscriptStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory knowledge base that stores shards in a Vec.
pub struct MemoryKnowledgeStore {
    shards: Arc<RwLock<Vec<KnowledgeShard>>>,
}

impl MemoryKnowledgeStore {
    pub fn new() -> Self {
        Self {
            shards: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for MemoryKnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeStore for MemoryKnowledgeStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn add(&self, shard: KnowledgeShard) -> Result<ShardId, StoreError> {
        let mut shards = self.shards.write().await;
        if let Some(existing) = shards.iter().find(|s| s.id == shard.id) {
            return Ok(existing.id.clone());
        }
        let id = shard.id.clone();
        shards.push(shard);
        Ok(id)
    }

    async fn get(&self, id: &ShardId) -> Result<Option<KnowledgeShard>, StoreError> {
        Ok(self.shards.read().await.iter().find(|s| &s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<KnowledgeShard>, StoreError> {
        Ok(self.shards.read().await.clone())
    }

    async fn reinforce(&self, id: &ShardId, cycles: u64, strength: u8) -> Result<(), StoreError> {
        let mut shards = self.shards.write().await;
        let shard = shards
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        shard.cycles = shard.cycles.max(cycles);
        shard.strength = strength.min(100);
        Ok(())
    }

    async fn set_status(&self, id: &ShardId, status: ShardStatus) -> Result<(), StoreError> {
        let mut shards = self.shards.write().await;
        let shard = shards
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        shard.status = status;
        Ok(())
    }

    async fn delete(&self, id: &ShardId) -> Result<bool, StoreError> {
        let mut shards = self.shards.write().await;
        let len_before = shards.len();
        shards.retain(|s| &s.id != id);
        Ok(shards.len() < len_before)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.shards.write().await.clear();
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.shards.read().await.len())
    }

    async fn total_cycles(&self) -> Result<u64, StoreError> {
        Ok(self.shards.read().await.iter().map(|s| s.cycles).sum())
    }
}

/// An in-memory transcript, seeded like a fresh console.
pub struct MemoryTranscriptStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Transcript::seeded().messages)),
        }
    }
}

impl Default for MemoryTranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for MemoryTranscriptStore {
    async fn load(&self) -> Result<Transcript, StoreError> {
        let messages = self.messages.read().await;
        let mut t = Transcript::new();
        for m in messages.iter() {
            t.push(m.clone());
        }
        Ok(t)
    }

    async fn append(&self, message: Message) -> Result<(), StoreError> {
        self.messages.write().await.push(message);
        Ok(())
    }

    async fn replace(&self, transcript: Transcript) -> Result<(), StoreError> {
        *self.messages.write().await = transcript.messages;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.messages.write().await = Transcript::seeded().messages;
        Ok(())
    }
}
