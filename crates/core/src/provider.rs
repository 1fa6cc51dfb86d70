//! Provider trait — the abstraction over the generative backend.
//!
//! All substantive computation (language generation, image/video
//! diffusion, speech synthesis) happens on the provider's side; the
//! engine only formats requests and consumes responses or chunk streams.
//!
//! Implementations: the hosted generative API client, and a scripted mock
//! for tests and offline runs.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A text-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The model to use
    pub model: String,

    /// Conversation history, oldest first; the prompt is the last user turn
    pub messages: Vec<Message>,

    /// System instruction prepended server-side (identity + packed knowledge)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,

    /// Temperature (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.9
}

/// A complete (non-streaming) generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated message
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A single chunk in a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Partial content delta
    #[serde(default)]
    pub text: Option<String>,

    /// Whether this is the final chunk
    #[serde(default)]
    pub done: bool,

    /// Usage info (typically only near the end of the stream)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// A speech-synthesis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub model: String,
    /// Text to voice — callers should pre-strip markup
    pub text: String,
    /// Prebuilt voice name
    pub voice: String,
}

/// Decoded synthesized audio.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// An image-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    /// e.g. "1:1"
    pub aspect_ratio: String,
}

/// Decoded generated image.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Video aspect ratios the console offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoAspect {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
}

impl VideoAspect {
    pub fn as_str(self) -> &'static str {
        match self {
            VideoAspect::Wide => "16:9",
            VideoAspect::Tall => "9:16",
        }
    }
}

/// A video-generation request. The provider implementation owns the
/// start-operation/poll/download cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: VideoAspect,
}

/// Downloaded generated video.
#[derive(Debug, Clone)]
pub struct VideoArtifact {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// The core Provider trait.
///
/// `stream()` hands back an mpsc receiver; dropping the receiver cancels
/// consumption — the forwarding task notices the closed channel and stops.
/// The media methods default to "not supported" so lightweight
/// implementations (mocks, text-only backends) stay small.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider.
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError>;

    /// Send a request and get a stream of response chunks.
    ///
    /// Default implementation calls `generate()` and wraps the result as a
    /// single chunk.
    async fn stream(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamChunk, ProviderError>>,
        ProviderError,
    > {
        let response = self.generate(request).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let _ = tx
            .send(Ok(StreamChunk {
                text: Some(response.message.content),
                done: true,
                usage: response.usage,
            }))
            .await;
        Ok(rx)
    }

    /// Synthesize speech for the given text.
    async fn synthesize_speech(
        &self,
        _request: SpeechRequest,
    ) -> std::result::Result<AudioClip, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support speech synthesis",
            self.name()
        )))
    }

    /// Generate an image.
    async fn generate_image(
        &self,
        _request: ImageRequest,
    ) -> std::result::Result<ImageArtifact, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support image generation",
            self.name()
        )))
    }

    /// Generate a video.
    async fn generate_video(
        &self,
        _request: VideoRequest,
    ) -> std::result::Result<VideoArtifact, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support video generation",
            self.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    struct TextOnly;

    #[async_trait]
    impl Provider for TextOnly {
        fn name(&self) -> &str {
            "text-only"
        }

        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> std::result::Result<GenerationResponse, ProviderError> {
            Ok(GenerationResponse {
                message: Message::assistant("derived"),
                usage: None,
                model: "test".into(),
            })
        }
    }

    #[tokio::test]
    async fn default_stream_wraps_generate() {
        let provider = TextOnly;
        let mut rx = provider
            .stream(GenerationRequest {
                model: "test".into(),
                messages: vec![Message::user("hi")],
                system_instruction: None,
                temperature: 0.9,
            })
            .await
            .unwrap();

        let chunk = rx.recv().await.unwrap().unwrap();
        assert_eq!(chunk.text.as_deref(), Some("derived"));
        assert!(chunk.done);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn media_methods_default_to_not_configured() {
        let provider = TextOnly;
        let err = provider
            .synthesize_speech(SpeechRequest {
                model: "tts".into(),
                text: "hello".into(),
                voice: "Kore".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn video_aspect_serializes_as_ratio() {
        let json = serde_json::to_string(&VideoAspect::Wide).unwrap();
        assert_eq!(json, "\"16:9\"");
    }
}
