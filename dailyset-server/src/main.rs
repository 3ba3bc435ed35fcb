//! dailyset-server - Main entry point
//!
//! Serves a daily-refreshed set of randomly sampled location records as a
//! downloadable JSON artifact. On startup the persisted set is checked for
//! staleness before traffic is accepted; a background task regenerates it
//! once per day at the configured hour in the configured time zone.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use dailyset_core::{Config, Generator, SetStore};
use dailyset_server::{build_router, limit, schedule, AppState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for dailyset-server
#[derive(Parser, Debug)]
#[command(name = "dailyset-server")]
#[command(about = "Daily location set server")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "DAILYSET_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "DAILYSET_PORT")]
    port: Option<u16>,

    /// Root directory of the sampleable corpus (overrides the config file)
    #[arg(long, env = "DAILYSET_CORPUS_ROOT")]
    corpus_root: Option<PathBuf>,

    /// Directory the daily set is persisted to (overrides the config file)
    #[arg(long, env = "DAILYSET_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dailyset_server=info,dailyset_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DailySet server v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(root) = args.corpus_root {
        config.corpus_root = root;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.validate().context("Invalid configuration")?;

    let tz = config.timezone()?;
    info!(
        corpus = %config.corpus_root.display(),
        output = %config.output_dir.display(),
        sample_size = config.sample_size,
        refresh = %format!("{:02}:00 {}", config.refresh_hour, config.timezone),
        "Configuration resolved"
    );

    let store = SetStore::new(&config.output_dir, config.artifact_name.clone(), tz);
    let generator = Arc::new(Generator::new(&config, store.clone())?);

    // Startup staleness check before accepting traffic. A failed generation
    // is logged, not fatal: the previously persisted set (if any) keeps
    // serving and the scheduler retries at the next tick.
    match generator.check_and_maybe_refresh(Utc::now()).await {
        Ok(true) => info!("Startup check regenerated the daily set"),
        Ok(false) => info!("Startup check found the daily set fresh"),
        Err(e) => error!("Startup generation failed: {}", e),
    }

    tokio::spawn(schedule::run_daily_refresh(
        generator.clone(),
        tz,
        config.refresh_hour,
    ));

    let limiter = limit::build_limiter(&config.rate_limit);
    let state = AppState::new(Arc::new(store), config.artifact_name.clone(), limiter);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("DailySet server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
