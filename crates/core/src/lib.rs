//! # AAAYAFUJ Core
//!
//! Domain types, traits, and error definitions for the AAAYAFUJ sovereign
//! console engine. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod package;
pub mod provider;
pub mod shard;
pub mod store;
pub mod theme;
pub mod voice;

// Re-export key types at crate root for ergonomics
pub use error::{Error, PackError, ProviderError, Result, StoreError};
pub use message::{GREETING, Message, Role, Transcript};
pub use package::{AiPackage, PackageKind, PackageStatus, builtin_registry};
pub use provider::{
    AudioClip, GenerationRequest, GenerationResponse, ImageArtifact, ImageRequest, Provider,
    SpeechRequest, StreamChunk, Usage, VideoArtifact, VideoAspect, VideoRequest,
};
pub use shard::{Intensity, KnowledgeShard, ShardId, ShardStatus, awareness_index, format_cycles};
pub use store::{KnowledgeStore, PackageStore, ThemeStore, TranscriptStore, VoiceStore};
pub use theme::ThemeConfig;
pub use voice::VoiceProfile;
