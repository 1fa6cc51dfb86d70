//! Error types for the AAAYAFUJ domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all AAAYAFUJ operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Context packing errors ---
    #[error("Pack error: {0}")]
    Pack(#[from] PackError),

    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from the knowledge packing core.
///
/// Both variants are deterministic misconfigurations: retrying the same
/// call changes nothing, so callers surface them immediately rather than
/// mistake them for "all shards dropped".
#[derive(Debug, Clone, Error)]
pub enum PackError {
    #[error("Invalid knowledge budget: {budget} (must be positive)")]
    InvalidBudget { budget: usize },

    #[error("Failed to render shard '{shard}': {reason}")]
    Format { shard: String, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Shard not found: {0}")]
    NotFound(String),

    #[error("Ingestion failed for {src}: {reason}")]
    IngestFailed { src: String, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from provider: {0}")]
    EmptyResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_error_displays_budget() {
        let err = Error::Pack(PackError::InvalidBudget { budget: 0 });
        assert!(err.to_string().contains('0'));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn store_error_wraps_into_top_level() {
        let err: Error = StoreError::NotFound("shard-1".into()).into();
        assert!(err.to_string().contains("shard-1"));
    }
}
