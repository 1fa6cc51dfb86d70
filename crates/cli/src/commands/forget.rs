//! `aaayafuj forget` — Delete a shard from the knowledge base.

use aaayafuj_core::shard::ShardId;
use aaayafuj_core::store::KnowledgeStore;
use aaayafuj_store::FileKnowledgeStore;

pub async fn run(id: &str, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, data_dir) = super::load_config()?;
    let store = FileKnowledgeStore::in_dir(&data_dir);

    if !super::confirm("Delete this shard from the eternal brain?", yes) {
        println!("  kept.");
        return Ok(());
    }

    if store.delete(&ShardId::from(id)).await? {
        println!("  shard {id} deleted.");
    } else {
        println!("  no shard with id {id}.");
    }
    Ok(())
}
