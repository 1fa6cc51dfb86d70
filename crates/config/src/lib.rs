//! Configuration loading, validation, and management for AAAYAFUJ.
//!
//! Loads configuration from `~/.aaayafuj/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.aaayafuj/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the generative backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the generative backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifiers per modality
    #[serde(default)]
    pub models: ModelsConfig,

    /// Text generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Knowledge base / context packing settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Where console state lives on disk
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("models", &self.models)
            .field("generation", &self.generation)
            .field("knowledge", &self.knowledge)
            .field("storage", &self.storage)
            .finish()
    }
}

/// Model ids per modality, defaulting to the hosted service's current set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_chat_model")]
    pub chat: String,

    #[serde(default = "default_speech_model")]
    pub speech: String,

    #[serde(default = "default_image_model")]
    pub image: String,

    #[serde(default = "default_video_model")]
    pub video: String,
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".into()
}
fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".into()
}
fn default_image_model() -> String {
    "gemini-3-pro-image-preview".into()
}
fn default_video_model() -> String {
    "veo-3.1-fast-generate-preview".into()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat: default_chat_model(),
            speech: default_speech_model(),
            image: default_image_model(),
            video: default_video_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature for chat
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Prebuilt voice used for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_temperature() -> f32 {
    0.9
}
fn default_voice() -> String {
    "Kore".into()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            voice: default_voice(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Hard character budget for the packed knowledge block
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Initial cycles for an uploaded file shard
    #[serde(default = "default_upload_cycles")]
    pub upload_cycles: u64,

    /// Initial cycles for a registered URL shard
    #[serde(default = "default_url_cycles")]
    pub url_cycles: u64,

    /// Cycles granted to built-in mastery presets
    #[serde(default = "default_preset_cycles")]
    pub preset_cycles: u64,

    /// Cycle target the hyper-tune reinforcement converges to
    #[serde(default = "default_tune_target")]
    pub tune_target_cycles: u64,
}

fn default_max_context_chars() -> usize {
    900_000
}
fn default_upload_cycles() -> u64 {
    500_000
}
fn default_url_cycles() -> u64 {
    1_000_000
}
fn default_preset_cycles() -> u64 {
    2_000_000_000
}
fn default_tune_target() -> u64 {
    100_000_000_000
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            max_context_chars: default_max_context_chars(),
            upload_cycles: default_upload_cycles(),
            url_cycles: default_url_cycles(),
            preset_cycles: default_preset_cycles(),
            tune_target_cycles: default_tune_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory holding all state files. `None` means `~/.aaayafuj`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

impl StorageConfig {
    /// Resolve the effective data directory.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(AppConfig::config_dir)
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.aaayafuj/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `AAAYAFUJ_API_KEY`, falling back to `API_KEY`
    /// - `AAAYAFUJ_API_URL`
    /// - `AAAYAFUJ_DATA_DIR`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("AAAYAFUJ_API_KEY")
                .ok()
                .or_else(|| std::env::var("API_KEY").ok());
        }

        if let Ok(url) = std::env::var("AAAYAFUJ_API_URL") {
            config.api_url = url;
        }

        if let Ok(dir) = std::env::var("AAAYAFUJ_DATA_DIR") {
            config.storage.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".aaayafuj")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.temperature < 0.0 || self.generation.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.knowledge.max_context_chars == 0 {
            return Err(ConfigError::ValidationError(
                "knowledge.max_context_chars must be positive".into(),
            ));
        }

        if self.knowledge.tune_target_cycles < self.knowledge.preset_cycles {
            return Err(ConfigError::ValidationError(
                "knowledge.tune_target_cycles must be at least preset_cycles".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for first-run scaffolding).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            models: ModelsConfig::default(),
            generation: GenerationConfig::default(),
            knowledge: KnowledgeConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
