//! File-backed stores — persistent JSON storage under the data directory.
//!
//! The knowledge base and memory stream use JSONL (one JSON object per
//! line); the package registry and theme are single small JSON documents.
//! Every store loads its state into memory on creation and flushes to disk
//! on every mutation. Corrupted lines are skipped with a warning rather
//! than poisoning the whole store.
//!
//! Storage layout under `~/.aaayafuj/`:
//! - `shards.jsonl`     — the eternal brain
//! - `transcript.jsonl` — the memory stream
//! - `packages.json`    — the package registry
//! - `theme.json`       — console theme
//! - `voice.json`       — forged voice profile

use aaayafuj_core::error::StoreError;
use aaayafuj_core::message::{Message, Transcript};
use aaayafuj_core::package::{AiPackage, builtin_registry};
use aaayafuj_core::shard::{KnowledgeShard, ShardId, ShardStatus};
use aaayafuj_core::store::{KnowledgeStore, PackageStore, ThemeStore, TranscriptStore, VoiceStore};
use aaayafuj_core::theme::ThemeConfig;
use aaayafuj_core::voice::VoiceProfile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

fn write_file(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StoreError::Storage(format!("Failed to create data directory: {e}")))?;
    }
    std::fs::write(path, content)
        .map_err(|e| StoreError::Storage(format!("Failed to write {}: {e}", path.display())))
}

fn load_jsonl<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Vec<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(), // File doesn't exist yet — start empty
    };

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<T>(line) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, what, "Skipping corrupted store entry");
                None
            }
        })
        .collect()
}

fn to_jsonl<T: serde::Serialize>(items: &[T]) -> Result<String, StoreError> {
    let mut content = String::new();
    for item in items {
        let line = serde_json::to_string(item)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize store entry: {e}")))?;
        content.push_str(&line);
        content.push('\n');
    }
    Ok(content)
}

// ── Knowledge base ────────────────────────────────────────────────────────

/// The file-backed knowledge base ("eternal brain").
pub struct FileKnowledgeStore {
    path: PathBuf,
    shards: Arc<RwLock<Vec<KnowledgeShard>>>,
}

impl FileKnowledgeStore {
    /// Open (or create) the store at the given path.
    pub fn new(path: PathBuf) -> Self {
        let shards: Vec<KnowledgeShard> = load_jsonl(&path, "shard");
        debug!(path = %path.display(), count = shards.len(), "Knowledge store loaded");
        Self {
            path,
            shards: Arc::new(RwLock::new(shards)),
        }
    }

    /// The store's file inside a data directory.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("shards.jsonl"))
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let shards = self.shards.read().await;
        write_file(&self.path, &to_jsonl(&shards)?)
    }
}

#[async_trait]
impl KnowledgeStore for FileKnowledgeStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn add(&self, shard: KnowledgeShard) -> Result<ShardId, StoreError> {
        {
            let mut shards = self.shards.write().await;
            if let Some(existing) = shards.iter().find(|s| s.id == shard.id) {
                return Ok(existing.id.clone());
            }
            shards.push(shard.clone());
        }
        self.flush().await?;
        Ok(shard.id)
    }

    async fn get(&self, id: &ShardId) -> Result<Option<KnowledgeShard>, StoreError> {
        Ok(self.shards.read().await.iter().find(|s| &s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<KnowledgeShard>, StoreError> {
        Ok(self.shards.read().await.clone())
    }

    async fn reinforce(&self, id: &ShardId, cycles: u64, strength: u8) -> Result<(), StoreError> {
        {
            let mut shards = self.shards.write().await;
            let shard = shards
                .iter_mut()
                .find(|s| &s.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            // Cycles grow monotonically
            shard.cycles = shard.cycles.max(cycles);
            shard.strength = strength.min(100);
        }
        self.flush().await
    }

    async fn set_status(&self, id: &ShardId, status: ShardStatus) -> Result<(), StoreError> {
        {
            let mut shards = self.shards.write().await;
            let shard = shards
                .iter_mut()
                .find(|s| &s.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            shard.status = status;
        }
        self.flush().await
    }

    async fn delete(&self, id: &ShardId) -> Result<bool, StoreError> {
        let deleted = {
            let mut shards = self.shards.write().await;
            let len_before = shards.len();
            shards.retain(|s| &s.id != id);
            shards.len() < len_before
        };
        if deleted {
            self.flush().await?;
        }
        Ok(deleted)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.shards.write().await.clear();
        self.flush().await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.shards.read().await.len())
    }

    async fn total_cycles(&self) -> Result<u64, StoreError> {
        Ok(self
            .shards
            .read()
            .await
            .iter()
            .map(|s| s.cycles)
            .sum())
    }
}

// ── Memory stream ─────────────────────────────────────────────────────────

/// The file-backed memory stream. A missing file yields the seeded
/// greeting, matching a fresh console.
pub struct FileTranscriptStore {
    path: PathBuf,
    messages: Arc<RwLock<Vec<Message>>>,
}

impl FileTranscriptStore {
    pub fn new(path: PathBuf) -> Self {
        let messages: Vec<Message> = if path.exists() {
            load_jsonl(&path, "message")
        } else {
            Transcript::seeded().messages
        };
        debug!(path = %path.display(), count = messages.len(), "Transcript store loaded");
        Self {
            path,
            messages: Arc::new(RwLock::new(messages)),
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("transcript.jsonl"))
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let messages = self.messages.read().await;
        write_file(&self.path, &to_jsonl(&messages)?)
    }
}

#[async_trait]
impl TranscriptStore for FileTranscriptStore {
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
        self.flush().await
    }

    async fn replace(&self, transcript: Transcript) -> Result<(), StoreError> {
        *self.messages.write().await = transcript.messages;
        self.flush().await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.messages.write().await = Transcript::seeded().messages;
        self.flush().await
    }
}

// ── Package registry ──────────────────────────────────────────────────────

/// The file-backed package registry, seeded with the built-in packages.
pub struct FilePackageStore {
    path: PathBuf,
    packages: Arc<RwLock<Vec<AiPackage>>>,
}

impl FilePackageStore {
    pub fn new(path: PathBuf) -> Self {
        let packages = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<AiPackage>>(&content) {
                Ok(pkgs) => pkgs,
                Err(e) => {
                    warn!(error = %e, "Corrupted package registry, reseeding");
                    builtin_registry()
                }
            },
            Err(_) => builtin_registry(),
        };
        Self {
            path,
            packages: Arc::new(RwLock::new(packages)),
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("packages.json"))
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let packages = self.packages.read().await;
        let content = serde_json::to_string_pretty(&*packages)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize packages: {e}")))?;
        write_file(&self.path, &content)
    }
}

#[async_trait]
impl PackageStore for FilePackageStore {
    async fn list(&self) -> Result<Vec<AiPackage>, StoreError> {
        Ok(self.packages.read().await.clone())
    }

    async fn upsert(&self, package: AiPackage) -> Result<(), StoreError> {
        {
            let mut packages = self.packages.write().await;
            match packages.iter_mut().find(|p| p.id == package.id) {
                Some(existing) => *existing = package,
                None => packages.push(package),
            }
        }
        self.flush().await
    }
}

// ── Theme ─────────────────────────────────────────────────────────────────

/// The file-backed theme store.
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("theme.json"))
    }
}

#[async_trait]
impl ThemeStore for FileThemeStore {
    async fn load(&self) -> Result<ThemeConfig, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).or_else(|e| {
                warn!(error = %e, "Corrupted theme file, using defaults");
                Ok(ThemeConfig::default())
            }),
            Err(_) => Ok(ThemeConfig::default()),
        }
    }

    async fn save(&self, theme: &ThemeConfig) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(theme)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize theme: {e}")))?;
        write_file(&self.path, &content)
    }
}

// ── Voice profile ─────────────────────────────────────────────────────────

/// The file-backed voice profile.
pub struct FileVoiceStore {
    path: PathBuf,
}

impl FileVoiceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("voice.json"))
    }
}

#[async_trait]
impl VoiceStore for FileVoiceStore {
    async fn load(&self) -> Result<VoiceProfile, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).or_else(|e| {
                warn!(error = %e, "Corrupted voice profile, resetting");
                Ok(VoiceProfile::default())
            }),
            Err(_) => Ok(VoiceProfile::default()),
        }
    }

    async fn save(&self, profile: &VoiceProfile) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(profile)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize voice profile: {e}")))?;
        write_file(&self.path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aaayafuj_core::package::PackageStatus;
    use tempfile::TempDir;

    fn test_shard(name: &str, cycles: u64) -> KnowledgeShard {
        KnowledgeShard::new(name, format!("{name} body"), cycles)
    }

    #[tokio::test]
    async fn shards_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let store = FileKnowledgeStore::in_dir(dir.path());
        let id = store.add(test_shard("notes.txt", 500_000)).await.unwrap();

        let store2 = FileKnowledgeStore::in_dir(dir.path());
        let shard = store2.get(&id).await.unwrap().unwrap();
        assert_eq!(shard.name, "notes.txt");
        assert_eq!(store2.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn add_with_existing_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = FileKnowledgeStore::in_dir(dir.path());

        let mut preset = test_shard("python_mastery", 2_000_000_000);
        preset.id = ShardId::from("python-core-mastery");
        store.add(preset.clone()).await.unwrap();
        preset.cycles = 1; // different payload, same id
        store.add(preset).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let kept = store
            .get(&ShardId::from("python-core-mastery"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.cycles, 2_000_000_000);
    }

    #[tokio::test]
    async fn reinforce_never_lowers_cycles() {
        let dir = TempDir::new().unwrap();
        let store = FileKnowledgeStore::in_dir(dir.path());
        let id = store.add(test_shard("a", 1_000_000)).await.unwrap();

        store.reinforce(&id, 500, 80).await.unwrap();
        let shard = store.get(&id).await.unwrap().unwrap();
        assert_eq!(shard.cycles, 1_000_000);
        assert_eq!(shard.strength, 80);

        store.reinforce(&id, 100_000_000_000, 100).await.unwrap();
        let shard = store.get(&id).await.unwrap().unwrap();
        assert_eq!(shard.cycles, 100_000_000_000);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = FileKnowledgeStore::in_dir(dir.path());
        for name in ["first", "second", "third"] {
            store.add(test_shard(name, 7)).await.unwrap();
        }
        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn delete_and_total_cycles() {
        let dir = TempDir::new().unwrap();
        let store = FileKnowledgeStore::in_dir(dir.path());
        let id = store.add(test_shard("a", 100)).await.unwrap();
        store.add(test_shard("b", 200)).await.unwrap();

        assert_eq!(store.total_cycles().await.unwrap(), 300);
        assert!(store.delete(&id).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
        assert_eq!(store.total_cycles().await.unwrap(), 200);
    }

    #[tokio::test]
    async fn corrupted_shard_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shards.jsonl");
        let shard = test_shard("valid", 1);
        let mut content = serde_json::to_string(&shard).unwrap();
        content.push('\n');
        content.push_str("this is not json\n");
        std::fs::write(&path, content).unwrap();

        let store = FileKnowledgeStore::new(path);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fresh_transcript_is_seeded() {
        let dir = TempDir::new().unwrap();
        let store = FileTranscriptStore::in_dir(dir.path());
        let t = store.load().await.unwrap();
        assert_eq!(t.messages.len(), 1);
        assert_eq!(t.messages[0].id, "init");
    }

    #[tokio::test]
    async fn transcript_append_persists() {
        let dir = TempDir::new().unwrap();
        let store = FileTranscriptStore::in_dir(dir.path());
        store.append(Message::user("hello")).await.unwrap();

        let store2 = FileTranscriptStore::in_dir(dir.path());
        let t = store2.load().await.unwrap();
        assert_eq!(t.messages.len(), 2);
        assert_eq!(t.messages[1].content, "hello");
    }

    #[tokio::test]
    async fn transcript_clear_reseeds() {
        let dir = TempDir::new().unwrap();
        let store = FileTranscriptStore::in_dir(dir.path());
        store.append(Message::user("hello")).await.unwrap();
        store.clear().await.unwrap();

        let t = store.load().await.unwrap();
        assert_eq!(t.messages.len(), 1);
        assert_eq!(t.messages[0].id, "init");
    }

    #[tokio::test]
    async fn packages_seed_and_upsert() {
        let dir = TempDir::new().unwrap();
        let store = FilePackageStore::in_dir(dir.path());
        let mut pkgs = store.list().await.unwrap();
        assert_eq!(pkgs.len(), 3);

        pkgs[0].status = PackageStatus::Installed;
        pkgs[0].progress = 100.0;
        store.upsert(pkgs[0].clone()).await.unwrap();

        let store2 = FilePackageStore::in_dir(dir.path());
        let reloaded = store2.list().await.unwrap();
        assert_eq!(reloaded[0].status, PackageStatus::Installed);
    }

    #[tokio::test]
    async fn voice_profile_defaults_then_persists() {
        let dir = TempDir::new().unwrap();
        let store = FileVoiceStore::in_dir(dir.path());
        assert_eq!(store.load().await.unwrap(), VoiceProfile::default());

        store
            .save(&VoiceProfile {
                cloned: true,
                forged_cycles: 7_000_000_000,
            })
            .await
            .unwrap();

        let store2 = FileVoiceStore::in_dir(dir.path());
        let profile = store2.load().await.unwrap();
        assert!(profile.cloned);
        assert_eq!(profile.forged_cycles, 7_000_000_000);
    }

    #[tokio::test]
    async fn theme_defaults_then_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = FileThemeStore::in_dir(dir.path());
        assert_eq!(store.load().await.unwrap(), ThemeConfig::default());

        let theme = ThemeConfig {
            bg_color: "#000000".into(),
            accent_color: "#ff0044".into(),
        };
        store.save(&theme).await.unwrap();
        assert_eq!(store.load().await.unwrap(), theme);
    }
}
