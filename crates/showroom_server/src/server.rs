//! Axum setup and router configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use showroom_core::{FileLocationService, FileSystemStore};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "showroom-server", version)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// SQLite database file
    #[arg(long, default_value = "showroom.db")]
    pub db_path: PathBuf,

    /// Directory archived images are written to
    #[arg(long, default_value = "images")]
    pub image_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Largest accepted upload body, in megabytes
    #[arg(long, default_value = "10")]
    pub max_upload_mb: usize,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 8080,
            bind: "127.0.0.1".to_string(),
            db_path: PathBuf::from("showroom.db"),
            image_dir: PathBuf::from("images"),
            timeout: 30,
            max_upload_mb: 10,
            log_level: "info".to_string(),
        }
    }
}

impl ServerArgs {
    /// Upload limit in bytes, clamped at `usize::MAX`.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    info!("Opening database at {}", args.db_path.display());
    let conn = showroom_core::db::open_db(&args.db_path)
        .with_context(|| format!("failed to open {}", args.db_path.display()))?;

    let locator = FileLocationService::new(
        Arc::new(Mutex::new(conn)),
        FileSystemStore::new(&args.image_dir),
    );
    let app = create_router(
        AppState::new(Arc::new(locator)),
        Duration::from_secs(args.timeout),
        args.max_upload_bytes(),
    );

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.bind, args.port))?;

    info!("Starting showroom-server on http://{}", addr);
    info!("Images: {}", args.image_dir.display());

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(state: AppState, timeout: Duration, max_upload_bytes: usize) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout));

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/file-system/image", post(routes::upload_image))
        .route("/file-system/image/{id}", get(routes::download_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
        .layer(middleware)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("SIGTERM handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
