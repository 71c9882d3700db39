//! mediahost - Main entry point
//!
//! Audio upload and catalog service. Uploads land in a flat storage
//! directory as `<id>.<ext>` + `<id>.json` pairs.

use anyhow::{Context, Result};
use clap::Parser;
use mediahost::config::{Args, Config};
use mediahost::{build_router, AppState};
use mediahost_common::config::{StorageInitializer, TomlConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediahost=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting mediahost v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Missing or broken config file is not fatal
    let file_config = match TomlConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            None
        }
    };
    let config = Config::resolve(&args, file_config);

    StorageInitializer::new(&config.storage_dir)
        .ensure_directory_exists()
        .context("Failed to initialize storage directory")?;
    info!("Storage directory: {}", config.storage_dir.display());
    match config.max_upload_bytes {
        Some(bytes) => info!("Upload limit: {} bytes", bytes),
        None => info!("Upload limit: none"),
    }

    let bind_addr = config.bind_addr.clone();
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind_addr.as_str())
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("mediahost listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
