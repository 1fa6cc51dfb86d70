//! State stores for the AAAYAFUJ console.
//!
//! Each store owns one piece of persisted console state — the knowledge
//! base, the memory stream, the package registry, the theme — with
//! load-on-start / write-on-mutation semantics. The file backends keep the
//! whole blob in memory and flush on every mutation: fast reads, durable
//! writes, human-inspectable state files.

pub mod file;
pub mod ingest;
pub mod memory;

pub use file::{
    FileKnowledgeStore, FilePackageStore, FileThemeStore, FileTranscriptStore, FileVoiceStore,
};
pub use ingest::{Preset, preset_shard, shard_from_file, shard_from_url};
pub use memory::{MemoryKnowledgeStore, MemoryTranscriptStore};
