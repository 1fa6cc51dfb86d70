//! CLI command implementations.

pub mod chat;
pub mod forget;
pub mod learn;
pub mod packages;
pub mod reset;
pub mod say;
pub mod shards;
pub mod status;
pub mod theme;
pub mod tune;
pub mod voice;

use aaayafuj_config::AppConfig;
use std::path::PathBuf;

/// Load config and resolve the data directory in one step — every
/// command starts this way.
pub(crate) fn load_config() -> Result<(AppConfig, PathBuf), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let data_dir = config.storage.resolved_data_dir();
    Ok((config, data_dir))
}

/// Ask for confirmation on stdin unless `--yes` was passed.
pub(crate) fn confirm(prompt: &str, skip: bool) -> bool {
    if skip {
        return true;
    }
    println!("{prompt} [y/N]");
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}
