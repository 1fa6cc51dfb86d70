//! End-to-end engine flow: ingest → reinforce → pack → instruct →
//! dispatch (mock) → persist.

use aaayafuj_context::build_system_instruction;
use aaayafuj_core::message::Message;
use aaayafuj_core::provider::{GenerationRequest, Provider};
use aaayafuj_core::store::{KnowledgeStore, TranscriptStore};
use aaayafuj_providers::MockProvider;
use aaayafuj_store::{
    FileKnowledgeStore, FileTranscriptStore, Preset, preset_shard, shard_from_file,
};
use tempfile::TempDir;

#[tokio::test]
async fn full_console_turn_round_trip() {
    let dir = TempDir::new().unwrap();

    // Ingest: one preset, one uploaded file.
    let knowledge = FileKnowledgeStore::in_dir(dir.path());
    knowledge
        .add(preset_shard(Preset::Python, 2_000_000_000))
        .await
        .unwrap();

    let upload = dir.path().join("notes.txt");
    std::fs::write(&upload, "ORBITAL MECHANICS BASICS").unwrap();
    let uploaded = shard_from_file(&upload, 500_000);
    let uploaded_id = knowledge.add(uploaded).await.unwrap();

    // Reinforce the upload to omega: it must now outrank the preset.
    knowledge
        .reinforce(&uploaded_id, 100_000_000_000, 100)
        .await
        .unwrap();

    // Pack + instruct.
    let shards = knowledge.list().await.unwrap();
    let instruction = build_system_instruction(&shards, 900_000).unwrap();
    assert!(instruction.packed.dropped.is_empty());
    assert_eq!(instruction.packed.entries.len(), 2);
    // Highest reinforcement first; bodies are lowercased into the prompt.
    assert!(instruction.packed.entries[0].contains("notes.txt"));
    assert!(instruction.packed.entries[0].contains("orbital mechanics basics"));
    assert!(instruction.packed.entries[1].contains("unfiltered_python_mastery.shard"));
    // 100b (upload) + 2b (preset) cycles → capped awareness.
    assert_eq!(instruction.awareness_index, 100.0);

    // Dispatch through the scripted provider.
    let transcript = FileTranscriptStore::in_dir(dir.path());
    let mut messages = transcript.load().await.unwrap().history();
    messages.push(Message::user("report orbital status"));
    transcript
        .append(Message::user("report orbital status"))
        .await
        .unwrap();

    let provider = MockProvider::scripted(vec!["MODE_LOGIC: ".into(), "stable orbit".into()]);
    let mut rx = provider
        .stream(GenerationRequest {
            model: "gemini-3-flash-preview".into(),
            messages,
            system_instruction: Some(instruction.text.clone()),
            temperature: 0.9,
        })
        .await
        .unwrap();

    let mut reply = String::new();
    while let Some(chunk) = rx.recv().await {
        if let Some(text) = chunk.unwrap().text {
            reply.push_str(&text.to_lowercase());
        }
    }
    assert_eq!(reply, "mode_logic: stable orbit");
    transcript.append(Message::assistant(&reply)).await.unwrap();

    // The provider saw the packed instruction and the seeded history.
    let seen = provider.last_request().unwrap();
    let seen_instruction = seen.system_instruction.unwrap();
    assert!(seen_instruction.contains("[knowledge context]"));
    assert!(seen_instruction.contains("orbital mechanics basics"));
    assert!(seen.messages[0].content.starts_with("# hello"));

    // Everything survives a process restart.
    let transcript2 = FileTranscriptStore::in_dir(dir.path());
    let stream = transcript2.load().await.unwrap();
    assert_eq!(stream.messages.len(), 3); // greeting + user + assistant
    assert_eq!(stream.messages[2].content, "mode_logic: stable orbit");

    let knowledge2 = FileKnowledgeStore::in_dir(dir.path());
    assert_eq!(knowledge2.total_cycles().await.unwrap(), 102_000_000_000);
}

#[tokio::test]
async fn tight_budget_drops_low_priority_shards_end_to_end() {
    let dir = TempDir::new().unwrap();
    let knowledge = FileKnowledgeStore::in_dir(dir.path());

    for (name, cycles) in [("heavy", 1_000_000u64), ("light", 10u64)] {
        let mut shard = aaayafuj_core::KnowledgeShard::new(name, "x".repeat(200), cycles);
        shard.id = aaayafuj_core::ShardId::from(name);
        knowledge.add(shard).await.unwrap();
    }

    // Budget admits only the heavy shard's entry.
    let shards = knowledge.list().await.unwrap();
    let instruction = build_system_instruction(&shards, 300).unwrap();
    assert_eq!(instruction.packed.entries.len(), 1);
    assert_eq!(
        instruction.packed.dropped,
        vec![aaayafuj_core::ShardId::from("light")]
    );
    assert!(instruction.text.contains("heavy"));
    assert!(!instruction.text.contains("[synapse_id: light"));
}
