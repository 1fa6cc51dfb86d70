//! Scripted mock provider — deterministic chunks for tests and offline runs.

use aaayafuj_core::error::ProviderError;
use aaayafuj_core::message::Message;
use aaayafuj_core::provider::*;
use async_trait::async_trait;
use std::sync::Mutex;

/// A provider that replays a fixed chunk script.
///
/// Records the last generation request so tests can assert on the
/// instruction and history the engine actually sent.
pub struct MockProvider {
    name: String,
    chunks: Vec<String>,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockProvider {
    /// Replay the given chunks, in order.
    pub fn scripted(chunks: Vec<String>) -> Self {
        Self {
            name: "mock".into(),
            chunks,
            last_request: Mutex::new(None),
        }
    }

    /// The stand-in used when no API key is configured.
    pub fn offline() -> Self {
        Self::scripted(vec![
            "MODE_LOGIC: offline shell\n".into(),
            "i don't know. no uplink is configured; ".into(),
            "inject an api key to reach the generative core.".into(),
        ])
    }

    /// The last request seen by `generate`/`stream`, if any.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn record(&self, request: &GenerationRequest) {
        *self.last_request.lock().unwrap() = Some(request.clone());
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        self.record(&request);
        Ok(GenerationResponse {
            message: Message::assistant(self.chunks.concat()),
            usage: None,
            model: request.model,
        })
    }

    async fn stream(
        &self,
        request: GenerationRequest,
    ) -> Result<
        tokio::sync::mpsc::Receiver<Result<StreamChunk, ProviderError>>,
        ProviderError,
    > {
        self.record(&request);
        let chunks = self.chunks.clone();
        let (tx, rx) = tokio::sync::mpsc::channel(16);

        tokio::spawn(async move {
            for text in chunks {
                let chunk = StreamChunk {
                    text: Some(text),
                    done: false,
                    usage: None,
                };
                if tx.send(Ok(chunk)).await.is_err() {
                    return; // consumer cancelled
                }
            }
            let _ = tx
                .send(Ok(StreamChunk {
                    text: None,
                    done: true,
                    usage: None,
                }))
                .await;
        });

        Ok(rx)
    }

    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<AudioClip, ProviderError> {
        Ok(AudioClip {
            bytes: request.text.into_bytes(),
            mime: "audio/pcm".into(),
        })
    }

    async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> Result<ImageArtifact, ProviderError> {
        Ok(ImageArtifact {
            bytes: request.prompt.into_bytes(),
            mime: "image/png".into(),
        })
    }

    async fn generate_video(
        &self,
        request: VideoRequest,
    ) -> Result<VideoArtifact, ProviderError> {
        Ok(VideoArtifact {
            bytes: request.prompt.into_bytes(),
            mime: "video/mp4".into(),
        })
    }
}
