//! soundbloom-server - sound catalog service
//!
//! Scans the sounds directory on every catalog request and serves the audio
//! files for in-browser playback.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use soundbloom_common::catalog::load_catalog;
use soundbloom_common::config::{
    resolve_root_folder, sounds_dir, TomlConfig, DEFAULT_HOST, DEFAULT_PORT, ROOT_ENV_VAR,
};
use soundbloom_server::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "soundbloom-server", version, about = "SoundBloom sound catalog service")]
struct Args {
    /// Root folder containing the `sounds` directory
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "SOUNDBLOOM_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "SOUNDBLOOM_PORT")]
    port: Option<u16>,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    scan_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification before anything that can fail
    info!(
        "Starting SoundBloom server (soundbloom-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let toml_config = TomlConfig::load();

    let root_folder = resolve_root_folder(
        args.root_folder.as_deref(),
        ROOT_ENV_VAR,
        toml_config.as_ref(),
    );
    let sounds_root = sounds_dir(&root_folder);
    info!("Sounds directory: {}", sounds_root.display());

    if args.scan_only {
        let catalog = load_catalog(&sounds_root)
            .with_context(|| format!("Failed to scan {}", sounds_root.display()))?;
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if !sounds_root.exists() {
        warn!("Sounds directory missing, creating {}", sounds_root.display());
        std::fs::create_dir_all(&sounds_root)
            .with_context(|| format!("Failed to create {}", sounds_root.display()))?;
    }

    let host = args
        .host
        .or_else(|| toml_config.as_ref().and_then(|c| c.host.clone()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args
        .port
        .or_else(|| toml_config.as_ref().and_then(|c| c.port))
        .unwrap_or(DEFAULT_PORT);

    let state = AppState::new(sounds_root);
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("soundbloom-server listening on http://{}", addr);
    info!("Catalog: http://{}/api/sounds", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
