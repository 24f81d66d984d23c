//! chordbook-api - guitar song catalog and chord recommendation service
//!
//! Startup order: parse CLI, load TOML config, initialize tracing, open the
//! SQLite catalog (optionally reseeding it with sample songs), then serve
//! HTTP until Ctrl+C / SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chordbook_common::config::{database_path, ChordbookConfig};
use chordbook_common::db::{init_database, sample::seed_sample_songs};
use chordbook_api::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for chordbook-api
#[derive(Parser, Debug)]
#[command(name = "chordbook-api")]
#[command(about = "Guitar song catalog with chord-based recommendations")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder holding chordbook.db
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the configured listen address
    #[arg(long)]
    host: Option<String>,

    /// Replace the catalog with the built-in sample songs before serving
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ChordbookConfig::load(args.config.as_deref());
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("chordbook_api={0},chordbook_common={0},tower_http={0}", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting chordbook-api v{}", env!("CARGO_PKG_VERSION"));

    config.validate().context("Invalid configuration")?;

    let root_folder = config.resolve_root_folder(args.root_folder.as_deref());
    let db_path = database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    if args.seed {
        let inserted = seed_sample_songs(&pool)
            .await
            .context("Failed to seed sample songs")?;
        info!("Seeded {} sample songs", inserted);
    }

    let app = build_router(AppState::new(pool, config.limits));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("chordbook-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
