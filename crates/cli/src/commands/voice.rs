//! `aaayafuj voice` — Show or forge the operator voice profile.
//!
//! The forge is a simulated animation; its only durable effect is the
//! profile record flipping to cloned.

use aaayafuj_core::format_cycles;
use aaayafuj_core::store::VoiceStore;
use aaayafuj_core::voice::VoiceProfile;
use aaayafuj_store::FileVoiceStore;
use aaayafuj_telemetry::{SimState, ThreadJitter, VoiceForgeSim};
use std::io::Write as _;
use std::time::Duration;

pub async fn run(forge: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, data_dir) = super::load_config()?;
    let store = FileVoiceStore::in_dir(&data_dir);
    let profile = store.load().await?;

    if !forge {
        if profile.cloned {
            println!("  master_resonance: active");
            println!(
                "  forged permutations: {}",
                format_cycles(profile.forged_cycles)
            );
        } else {
            println!("  no voice profile forged. run `aaayafuj voice --forge`.");
        }
        return Ok(());
    }

    if profile.cloned {
        println!("  voice already forged.");
        return Ok(());
    }

    println!("  forging master voice profile");
    let mut sim = VoiceForgeSim::new();
    let mut jitter = ThreadJitter;
    let mut ticker = tokio::time::interval(Duration::from_millis(100));

    loop {
        ticker.tick().await;
        let state = sim.step(&mut jitter);
        print!(
            "\r  {:>5.1}%  forge permutations: {}",
            sim.progress(),
            format_cycles(sim.forged_cycles())
        );
        std::io::stdout().flush()?;
        if state == SimState::Complete {
            break;
        }
    }
    println!();

    store
        .save(&VoiceProfile {
            cloned: true,
            forged_cycles: sim.forged_cycles(),
        })
        .await?;
    println!("  vocal resonance locked.");
    Ok(())
}
