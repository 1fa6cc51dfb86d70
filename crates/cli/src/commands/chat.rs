//! `aaayafuj chat` — Interactive console or single-message mode.

use aaayafuj_context::build_system_instruction;
use aaayafuj_core::message::{Message, Role};
use aaayafuj_core::provider::GenerationRequest;
use aaayafuj_core::store::{KnowledgeStore, TranscriptStore};
use aaayafuj_core::Provider;
use aaayafuj_markup::render_text;
use aaayafuj_store::{FileKnowledgeStore, FileTranscriptStore};
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, data_dir) = super::load_config()?;
    let knowledge = FileKnowledgeStore::in_dir(&data_dir);
    let transcript = FileTranscriptStore::in_dir(&data_dir);
    let provider = aaayafuj_providers::from_config(&config);

    if let Some(msg) = message {
        // Single-message mode: complete response, rendered.
        let reply = send(&config, &knowledge, &transcript, provider.as_ref(), &msg, false).await?;
        println!("{}", render_text(&reply));
    } else {
        interactive(&config, &knowledge, &transcript, provider).await?;
    }

    Ok(())
}

async fn interactive(
    config: &aaayafuj_config::AppConfig,
    knowledge: &FileKnowledgeStore,
    transcript: &FileTranscriptStore,
    provider: Arc<dyn Provider>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shard_count = knowledge.count().await?;
    println!();
    println!("  aaayafuj console — interactive mode");
    println!("  model: {}", config.models.chat);
    println!("  shards: {shard_count}");
    println!("  type 'exit' to leave");
    println!();

    // Replay the tail of the memory stream.
    let history = transcript.load().await?;
    for msg in history.messages.iter().rev().take(4).rev() {
        match msg.role {
            Role::User => println!("> {}", msg.content),
            _ => print!("{}", render_text(&msg.content)),
        }
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        send(config, knowledge, transcript, provider.as_ref(), &line, true).await?;
        println!();
    }

    Ok(())
}

/// One full turn: pack the knowledge context, dispatch the prompt, stream
/// (or collect) the reply, and persist both sides of the exchange.
async fn send(
    config: &aaayafuj_config::AppConfig,
    knowledge: &FileKnowledgeStore,
    transcript: &FileTranscriptStore,
    provider: &dyn Provider,
    prompt: &str,
    stream: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let shards = knowledge.list().await?;
    let instruction =
        build_system_instruction(&shards, config.knowledge.max_context_chars)?;

    if !instruction.packed.dropped.is_empty() {
        eprintln!(
            "  (knowledge truncated: {} shard(s) beyond the context budget)",
            instruction.packed.dropped.len()
        );
    }

    let user_message = Message::user(prompt);
    let mut messages = transcript.load().await?.history();
    messages.push(user_message.clone());
    transcript.append(user_message).await?;

    let request = GenerationRequest {
        model: config.models.chat.clone(),
        messages,
        system_instruction: Some(instruction.text),
        temperature: config.generation.temperature,
    };

    // The console renders everything lowercased.
    let reply = if stream {
        let mut rx = provider.stream(request).await?;
        let mut full = String::new();
        while let Some(chunk) = rx.recv().await {
            let chunk = chunk?;
            if let Some(text) = chunk.text {
                let text = text.to_lowercase();
                print!("{text}");
                std::io::stdout().flush()?;
                full.push_str(&text);
            }
            if chunk.done {
                break;
            }
        }
        println!();
        full
    } else {
        let response = provider.generate(request).await?;
        response.message.content.to_lowercase()
    };

    transcript.append(Message::assistant(&reply)).await?;
    Ok(reply)
}
