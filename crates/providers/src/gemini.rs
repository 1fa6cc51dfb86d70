//! Gemini-style Generative Language API client.
//!
//! Speaks the hosted service's REST surface directly:
//! - `models/{model}:generateContent` for complete responses
//! - `models/{model}:streamGenerateContent?alt=sse` for chunk streams
//! - speech/image generation via inline base64 payloads
//! - video generation via a long-running operation: start, poll, download
//!
//! Authentication is the `x-goog-api-key` header.

use aaayafuj_core::error::ProviderError;
use aaayafuj_core::message::{Message, Role};
use aaayafuj_core::provider::*;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::StreamExt;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_VIDEO_POLL: Duration = Duration::from_secs(10);

/// Gemini REST API provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    /// How long to wait between video operation polls.
    video_poll_interval: Duration,
}

impl GeminiProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // video operations are slow
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
            video_poll_interval: DEFAULT_VIDEO_POLL,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the video poll interval (tests).
    pub fn with_video_poll_interval(mut self, interval: Duration) -> Self {
        self.video_poll_interval = interval;
        self
    }

    /// Convert transcript messages to API contents. System messages are
    /// skipped — the instruction travels as a top-level field.
    fn to_api_contents(messages: &[Message]) -> Vec<ApiContent> {
        messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                    Role::System => return None,
                };
                Some(ApiContent {
                    role: role.into(),
                    parts: vec![ApiPart {
                        text: msg.content.clone(),
                    }],
                })
            })
            .collect()
    }

    fn request_body(request: &GenerationRequest) -> serde_json::Value {
        let contents = Self::to_api_contents(&request.messages);
        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": { "temperature": request.temperature },
        });
        if let Some(instruction) = &request.system_instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": instruction }]
            });
        }
        body
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        accept_sse: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        let mut req = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json");
        if accept_sse {
            req = req.header("Accept", "text/event-stream");
        }

        let response = req
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 429 {
            return Err(ProviderError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key".into(),
            ));
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(url.to_string()));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Generative API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }
        Ok(response)
    }

    /// Pull the first text part out of a generateContent response.
    fn extract_text(value: &serde_json::Value) -> Option<String> {
        let parts = value["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() { None } else { Some(text) }
    }

    /// Pull the first inline-data blob (base64) out of a response.
    fn extract_inline_data(value: &serde_json::Value) -> Option<(Vec<u8>, String)> {
        let parts = value["candidates"][0]["content"]["parts"].as_array()?;
        for part in parts {
            if let Some(data) = part["inlineData"]["data"].as_str() {
                let mime = part["inlineData"]["mimeType"]
                    .as_str()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                if let Ok(bytes) = BASE64.decode(data) {
                    return Some((bytes, mime));
                }
            }
        }
        None
    }

    fn extract_usage(value: &serde_json::Value) -> Option<Usage> {
        let meta = value.get("usageMetadata")?;
        let prompt = meta["promptTokenCount"].as_u64()? as u32;
        let completion = meta["candidatesTokenCount"].as_u64().unwrap_or(0) as u32;
        Some(Usage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        })
    }
}

#[derive(Debug, Serialize)]
struct ApiContent {
    role: String,
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize)]
struct ApiPart {
    text: String,
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = Self::request_body(&request);

        debug!(provider = "gemini", model = %request.model, "Sending completion request");

        let response = self.post_json(&url, &body, false).await?;
        let value: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            }
        })?;

        let text = Self::extract_text(&value)
            .ok_or_else(|| ProviderError::EmptyResponse("no text candidates".into()))?;

        Ok(GenerationResponse {
            message: Message::assistant(text),
            usage: Self::extract_usage(&value),
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
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, request.model
        );
        let body = Self::request_body(&request);

        debug!(provider = "gemini", model = %request.model, "Sending streaming request");

        let response = self.post_json(&url, &body, true).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(64);

        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();
            let mut usage: Option<Usage> = None;

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(ProviderError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim_end_matches('\r').to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    let data = data.trim();
                    if data.is_empty() {
                        continue;
                    }

                    let event: serde_json::Value = match serde_json::from_str(data) {
                        Ok(v) => v,
                        Err(e) => {
                            trace!(error = %e, data = %data, "Ignoring unparseable SSE event");
                            continue;
                        }
                    };

                    if let Some(u) = Self::extract_usage(&event) {
                        usage = Some(u);
                    }

                    if let Some(text) = Self::extract_text(&event) {
                        let chunk = StreamChunk {
                            text: Some(text),
                            done: false,
                            usage: None,
                        };
                        // Receiver dropped — consumer cancelled, stop.
                        if tx.send(Ok(chunk)).await.is_err() {
                            return;
                        }
                    }

                    let finished = event["candidates"][0]["finishReason"]
                        .as_str()
                        .is_some_and(|r| r != "FINISH_REASON_UNSPECIFIED");
                    if finished {
                        let _ = tx
                            .send(Ok(StreamChunk {
                                text: None,
                                done: true,
                                usage: usage.take(),
                            }))
                            .await;
                        return;
                    }
                }
            }

            // Stream ended without an explicit finish — still final.
            let _ = tx
                .send(Ok(StreamChunk {
                    text: None,
                    done: true,
                    usage,
                }))
                .await;
        });

        Ok(rx)
    }

    async fn synthesize_speech(
        &self,
        request: SpeechRequest,
    ) -> Result<AudioClip, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{
                "text": format!("Respond in a neutral, sovereign robot voice: {}", request.text)
            }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": request.voice }
                    }
                }
            }
        });

        let response = self.post_json(&url, &body, false).await?;
        let value: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse speech response: {e}"),
            }
        })?;

        let (bytes, mime) = Self::extract_inline_data(&value)
            .ok_or_else(|| ProviderError::EmptyResponse("no audio payload".into()))?;
        Ok(AudioClip { bytes, mime })
    }

    async fn generate_image(
        &self,
        request: ImageRequest,
    ) -> Result<ImageArtifact, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "imageConfig": {
                    "aspectRatio": request.aspect_ratio,
                    "imageSize": "1K"
                }
            }
        });

        let response = self.post_json(&url, &body, false).await?;
        let value: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse image response: {e}"),
            }
        })?;

        let (bytes, mime) = Self::extract_inline_data(&value)
            .ok_or_else(|| ProviderError::EmptyResponse("no image payload".into()))?;
        Ok(ImageArtifact { bytes, mime })
    }

    async fn generate_video(
        &self,
        request: VideoRequest,
    ) -> Result<VideoArtifact, ProviderError> {
        // Start the long-running operation.
        let url = format!(
            "{}/v1beta/models/{}:predictLongRunning",
            self.base_url, request.model
        );
        let body = serde_json::json!({
            "instances": [{ "prompt": request.prompt.to_lowercase() }],
            "parameters": {
                "numberOfVideos": 1,
                "resolution": "1080p",
                "aspectRatio": request.aspect_ratio.as_str()
            }
        });

        let response = self.post_json(&url, &body, false).await?;
        let started: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse operation response: {e}"),
            }
        })?;
        let op_name = started["name"]
            .as_str()
            .ok_or_else(|| ProviderError::EmptyResponse("no operation name".into()))?
            .to_string();

        // Poll until done.
        let op_url = format!("{}/v1beta/{}", self.base_url, op_name);
        let operation = loop {
            tokio::time::sleep(self.video_poll_interval).await;

            let response = self
                .client
                .get(&op_url)
                .header("x-goog-api-key", &self.api_key)
                .send()
                .await
                .map_err(|e| ProviderError::Network(e.to_string()))?;
            let value: serde_json::Value = response.json().await.map_err(|e| {
                ProviderError::ApiError {
                    status_code: 200,
                    message: format!("Failed to parse operation poll: {e}"),
                }
            })?;

            if value["done"].as_bool().unwrap_or(false) {
                break value;
            }
            debug!(operation = %op_name, "Video operation still running");
        };

        let uri = operation["response"]["generateVideoResponse"]["generatedSamples"][0]
            ["video"]["uri"]
            .as_str()
            .ok_or_else(|| ProviderError::EmptyResponse("no video uri".into()))?;

        // Download the artifact.
        let sep = if uri.contains('?') { '&' } else { '?' };
        let download_url = format!("{uri}{sep}key={}", self.api_key);
        let response = self
            .client
            .get(&download_url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let mime = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("video/mp4")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?
            .to_vec();

        Ok(VideoArtifact { bytes, mime })
    }
}
