//! AAAYAFUJ CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive console or single-message mode
//! - `learn`    — Inject knowledge shards (files, URLs, presets)
//! - `shards`   — List the knowledge base
//! - `tune`     — Hyper-tune a shard's reinforcement
//! - `forget`   — Delete a shard
//! - `status`   — Show engine status and telemetry
//! - `packages` — List or install AI packages
//! - `theme`    — Show or change the console theme
//! - `voice`    — Show or forge the operator voice profile
//! - `say`      — Synthesize speech for a text
//! - `reset`    — Purge the memory stream and knowledge base

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "aaayafuj",
    about = "AAAYAFUJ — sovereign console engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the console
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Inject knowledge shards
    Learn {
        #[command(subcommand)]
        source: LearnSource,
    },

    /// List the knowledge base
    Shards,

    /// Hyper-tune a shard's reinforcement count
    Tune {
        /// Shard id (see `aaayafuj shards`)
        id: String,
    },

    /// Delete a shard from the knowledge base
    Forget {
        /// Shard id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show engine status and telemetry
    Status,

    /// List or install AI packages
    Packages {
        /// Package id to install
        #[arg(long)]
        install: Option<String>,
    },

    /// Show or change the console theme
    Theme {
        /// Background color (#rrggbb)
        #[arg(long)]
        bg: Option<String>,

        /// Accent color (#rrggbb)
        #[arg(long)]
        accent: Option<String>,
    },

    /// Show or forge the operator voice profile
    Voice {
        /// Run the forge instead of showing the profile
        #[arg(long)]
        forge: bool,
    },

    /// Synthesize speech for a text
    Say {
        /// Text to voice
        text: String,

        /// Output file (extension follows the returned format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Purge the memory stream and knowledge base
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LearnSource {
    /// Upload local files as shards
    File {
        /// Paths to ingest
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Register a URL as an online-learning shard
    Url { url: String },

    /// Inject a built-in mastery preset
    Preset {
        /// `python` or `html`
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Learn { source } => match source {
            LearnSource::File { paths } => commands::learn::files(&paths).await?,
            LearnSource::Url { url } => commands::learn::url(&url).await?,
            LearnSource::Preset { name } => commands::learn::preset(&name).await?,
        },
        Commands::Shards => commands::shards::run().await?,
        Commands::Tune { id } => commands::tune::run(&id).await?,
        Commands::Forget { id, yes } => commands::forget::run(&id, yes).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Packages { install } => commands::packages::run(install.as_deref()).await?,
        Commands::Theme { bg, accent } => commands::theme::run(bg, accent).await?,
        Commands::Voice { forge } => commands::voice::run(forge).await?,
        Commands::Say { text, output } => commands::say::run(&text, output).await?,
        Commands::Reset { yes } => commands::reset::run(yes).await?,
    }

    Ok(())
}
