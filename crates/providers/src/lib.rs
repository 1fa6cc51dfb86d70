//! Generative backend clients for AAAYAFUJ.
//!
//! All providers implement the `aaayafuj_core::Provider` trait. The real
//! client speaks a Generative-Language-style HTTP API; the mock is a
//! scripted stand-in for tests and offline runs.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

use aaayafuj_config::AppConfig;
use aaayafuj_core::Provider;
use std::sync::Arc;

/// Build the configured provider. Without an API key the mock is used so
/// the console stays operable offline.
pub fn from_config(config: &AppConfig) -> Arc<dyn Provider> {
    match &config.api_key {
        Some(key) => Arc::new(
            GeminiProvider::new(key.clone()).with_base_url(config.api_url.clone()),
        ),
        None => {
            tracing::warn!("No API key configured — using the offline mock provider");
            Arc::new(MockProvider::offline())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_mock() {
        let config = AppConfig::default();
        let provider = from_config(&config);
        assert_eq!(provider.name(), "mock");
    }

    #[test]
    fn key_selects_the_http_client() {
        let mut config = AppConfig::default();
        config.api_key = Some("k".into());
        let provider = from_config(&config);
        assert_eq!(provider.name(), "gemini");
    }
}
