//! `aaayafuj status` — Show engine status and one telemetry frame.

use aaayafuj_config::AppConfig;
use aaayafuj_core::store::{KnowledgeStore, PackageStore};
use aaayafuj_core::{PackageStatus, awareness_index, format_cycles};
use aaayafuj_store::{FileKnowledgeStore, FilePackageStore};
use aaayafuj_telemetry::{TelemetryEngine, ThreadJitter};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, data_dir) = super::load_config()?;
    let knowledge = FileKnowledgeStore::in_dir(&data_dir);
    let packages = FilePackageStore::in_dir(&data_dir);

    let shard_count = knowledge.count().await?;
    let total_cycles = knowledge.total_cycles().await?;
    let installed = packages
        .list()
        .await?
        .iter()
        .filter(|p| matches!(p.status, PackageStatus::Installed | PackageStatus::Running))
        .count();

    println!("  aaayafuj status");
    println!("  ===============");
    println!("  config dir:         {}", AppConfig::config_dir().display());
    println!("  data dir:           {}", data_dir.display());
    println!("  chat model:         {}", config.models.chat);
    println!("  context budget:     {} chars", config.knowledge.max_context_chars);
    println!("  uplink:             {}", if config.has_api_key() { "configured" } else { "offline (mock)" });
    println!();
    println!("  shards:             {shard_count}");
    println!("  total_permutations: {}", format_cycles(total_cycles));
    println!("  awareness_index:    {:.2}%", awareness_index(total_cycles));
    println!("  packages installed: {installed}/3");
    println!(
        "  {}",
        if shard_count > 0 {
            "neural_sovereignty_active"
        } else {
            "zero_knowledge_shell"
        }
    );

    // One simulated hardware frame, pinned to the real awareness index.
    let telemetry = TelemetryEngine::new();
    telemetry.set_awareness_from_cycles(total_cycles);
    telemetry.tick(&mut ThreadJitter);
    let frame = telemetry.snapshot();
    println!();
    println!("  cpu {:.1}%  ram {:.1}%  gpu {:.1}%  temp {:.1}c  vram {:.1}gb",
        frame.cpu, frame.ram, frame.gpu, frame.temp, frame.vram);

    Ok(())
}
