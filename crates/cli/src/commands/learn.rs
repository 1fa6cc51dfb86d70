//! `aaayafuj learn` — Inject knowledge shards.

use aaayafuj_core::format_cycles;
use aaayafuj_core::store::KnowledgeStore;
use aaayafuj_store::{FileKnowledgeStore, Preset, preset_shard, shard_from_file, shard_from_url};
use std::path::PathBuf;

pub async fn files(paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let (config, data_dir) = super::load_config()?;
    let store = FileKnowledgeStore::in_dir(&data_dir);

    for path in paths {
        let shard = shard_from_file(path, config.knowledge.upload_cycles);
        let readable = shard.content.is_some();
        let name = shard.name.clone();
        let id = store.add(shard).await?;
        if readable {
            println!("  injected {name}  [{id}]");
        } else {
            println!("  injected {name}  [{id}]  (unreadable — excluded from context)");
        }
    }

    println!("  {} shard(s) in the brain", store.count().await?);
    Ok(())
}

pub async fn url(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, data_dir) = super::load_config()?;
    let store = FileKnowledgeStore::in_dir(&data_dir);

    let shard = shard_from_url(url, config.knowledge.url_cycles)?;
    let name = shard.name.clone();
    let id = store.add(shard).await?;
    println!("  registered {name}  [{id}]");
    Ok(())
}

pub async fn preset(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, data_dir) = super::load_config()?;
    let store = FileKnowledgeStore::in_dir(&data_dir);

    let preset = match name.to_ascii_lowercase().as_str() {
        "python" => Preset::Python,
        "html" => Preset::Html,
        other => return Err(format!("Unknown preset '{other}' (expected python or html)").into()),
    };

    let shard = preset_shard(preset, config.knowledge.preset_cycles);
    let display = shard.name.clone();
    let cycles = shard.cycles;
    store.add(shard).await?;
    println!("  synced {display}  ({} permutations)", format_cycles(cycles));
    Ok(())
}
