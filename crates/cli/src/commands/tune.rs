//! `aaayafuj tune` — Hyper-tune a shard's reinforcement count.
//!
//! The sweep is simulated: random jumps on a timer until the target is
//! hit. The only durable effect is the final reinforce/status write.

use aaayafuj_core::format_cycles;
use aaayafuj_core::shard::{ShardId, ShardStatus};
use aaayafuj_core::store::KnowledgeStore;
use aaayafuj_store::FileKnowledgeStore;
use aaayafuj_telemetry::{HyperTuneSim, SimState, ThreadJitter};
use std::io::Write as _;
use std::time::Duration;

pub async fn run(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, data_dir) = super::load_config()?;
    let store = FileKnowledgeStore::in_dir(&data_dir);

    let shard_id = ShardId::from(id);
    let shard = store
        .get(&shard_id)
        .await?
        .ok_or_else(|| format!("No shard with id {id}"))?;

    let target = config.knowledge.tune_target_cycles;
    if shard.cycles >= target {
        println!("  {} already at omega ({})", shard.name, format_cycles(target));
        return Ok(());
    }

    store.set_status(&shard_id, ShardStatus::Learning).await?;
    println!("  refining {}", shard.name);

    let mut sim = HyperTuneSim::new(shard.cycles, target);
    let mut jitter = ThreadJitter;
    let mut ticker = tokio::time::interval(Duration::from_millis(40));

    loop {
        ticker.tick().await;
        let state = sim.step(&mut jitter);
        print!(
            "\r  {:>5.1}%  {} permutations",
            sim.percent(),
            format_cycles(sim.cycles())
        );
        std::io::stdout().flush()?;
        if state == SimState::Complete {
            break;
        }
    }
    println!();

    store.reinforce(&shard_id, target, 100).await?;
    store.set_status(&shard_id, ShardStatus::Ready).await?;
    println!("  omega instinct reached.");
    Ok(())
}
