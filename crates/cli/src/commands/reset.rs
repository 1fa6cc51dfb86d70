//! `aaayafuj reset` — Purge the memory stream and knowledge base.

use aaayafuj_core::store::{KnowledgeStore, TranscriptStore};
use aaayafuj_store::{FileKnowledgeStore, FileTranscriptStore};

pub async fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, data_dir) = super::load_config()?;

    if !super::confirm(
        "Purge the memory stream and every knowledge shard?",
        yes,
    ) {
        println!("  kept.");
        return Ok(());
    }

    let knowledge = FileKnowledgeStore::in_dir(&data_dir);
    let transcript = FileTranscriptStore::in_dir(&data_dir);

    knowledge.clear().await?;
    transcript.clear().await?;

    println!("  brain purged. primordial state restored.");
    Ok(())
}
