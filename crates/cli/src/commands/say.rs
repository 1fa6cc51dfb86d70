//! `aaayafuj say` — Synthesize speech for a text.

use aaayafuj_core::provider::SpeechRequest;
use aaayafuj_markup::{speech_excerpt, strip_modes};
use std::path::PathBuf;

pub async fn run(text: &str, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, _data_dir) = super::load_config()?;
    let provider = aaayafuj_providers::from_config(&config);

    // Same cleaning the console applies before voicing a reply.
    let speakable = speech_excerpt(&strip_modes(text));

    let clip = provider
        .synthesize_speech(SpeechRequest {
            model: config.models.speech.clone(),
            text: speakable,
            voice: config.generation.voice.clone(),
        })
        .await?;

    let path = output.unwrap_or_else(|| {
        let ext = extension_for(&clip.mime);
        PathBuf::from(format!("derivation.{ext}"))
    });
    std::fs::write(&path, &clip.bytes)?;
    println!(
        "  wrote {} ({} bytes, {})",
        path.display(),
        clip.bytes.len(),
        clip.mime
    );
    Ok(())
}

fn extension_for(mime: &str) -> &'static str {
    if mime.contains("wav") {
        "wav"
    } else if mime.contains("mp3") || mime.contains("mpeg") {
        "mp3"
    } else {
        "pcm"
    }
}
