//! `aaayafuj packages` — List or "install" AI packages.
//!
//! Installation is a simulated download: the progress bar is jitter on a
//! timer; the durable effect is the status flip in the registry.

use aaayafuj_core::package::PackageStatus;
use aaayafuj_core::store::PackageStore;
use aaayafuj_store::FilePackageStore;
use aaayafuj_telemetry::{DownloadSim, SimState, ThreadJitter};
use std::io::Write as _;
use std::time::Duration;

pub async fn run(install: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, data_dir) = super::load_config()?;
    let store = FilePackageStore::in_dir(&data_dir);

    match install {
        Some(id) => download(&store, id).await,
        None => list(&store).await,
    }
}

async fn list(store: &FilePackageStore) -> Result<(), Box<dyn std::error::Error>> {
    println!("  ai packages");
    println!("  ===========");
    for pkg in store.list().await? {
        let status = match pkg.status {
            PackageStatus::Available => "available",
            PackageStatus::Downloading => "downloading",
            PackageStatus::Installed => "installed",
            PackageStatus::Running => "running",
        };
        println!(
            "  {:<16} {:<24} v{:<8} {}",
            pkg.id, pkg.name, pkg.version, status
        );
        println!("      {}", pkg.description);
    }
    Ok(())
}

async fn download(store: &FilePackageStore, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut pkg = store
        .list()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| format!("No package with id {id}"))?;

    if pkg.status == PackageStatus::Installed {
        println!("  {} is already installed.", pkg.name);
        return Ok(());
    }

    pkg.status = PackageStatus::Downloading;
    pkg.progress = 0.0;
    store.upsert(pkg.clone()).await?;
    println!("  downloading {}", pkg.name);

    let mut sim = DownloadSim::new();
    let mut jitter = ThreadJitter;
    let mut ticker = tokio::time::interval(Duration::from_millis(300));

    loop {
        ticker.tick().await;
        let state = sim.step(&mut jitter);
        pkg.progress = sim.progress();
        print!("\r  {:>5.1}%", pkg.progress);
        std::io::stdout().flush()?;
        if state == SimState::Complete {
            break;
        }
        store.upsert(pkg.clone()).await?;
    }
    println!();

    pkg.status = PackageStatus::Installed;
    pkg.progress = 100.0;
    store.upsert(pkg).await?;
    println!("  installed.");
    Ok(())
}
