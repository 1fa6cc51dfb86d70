//! `aaayafuj shards` — List the knowledge base.

use aaayafuj_core::format_cycles;
use aaayafuj_core::shard::ShardStatus;
use aaayafuj_core::store::KnowledgeStore;
use aaayafuj_store::FileKnowledgeStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, data_dir) = super::load_config()?;
    let store = FileKnowledgeStore::in_dir(&data_dir);

    let shards = store.list().await?;
    if shards.is_empty() {
        println!("  empty memory. inject shards to build the brain.");
        return Ok(());
    }

    println!("  eternal memory repository");
    println!("  =========================");
    for shard in &shards {
        let status = match shard.status {
            ShardStatus::Indexed => "indexed",
            ShardStatus::Learning => "learning",
            ShardStatus::Ready => "ready",
        };
        let context = if shard.content.is_some() {
            ""
        } else {
            "  (no content)"
        };
        println!(
            "  {}  {}\n      {} permutations | strength {}% | {}{}",
            shard.id,
            shard.name,
            format_cycles(shard.cycles),
            shard.strength,
            status,
            context,
        );
    }

    println!();
    println!(
        "  total_permutations: {}",
        format_cycles(store.total_cycles().await?)
    );
    Ok(())
}
