//! OpsDesk server entry point.
//!
//! Wires the shared store, token authority, presence registry, and push
//! hub together and serves the HTTP/SSE API.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use opsdesk_api::AppState;
use opsdesk_auth::TokenAuthority;
use opsdesk_cache::CacheManager;
use opsdesk_core::config::AppConfig;
use opsdesk_core::error::AppError;
use opsdesk_core::traits::UserDirectory;
use opsdesk_presence::PresenceRegistry;
use opsdesk_push::PushHub;
use opsdesk_service::StaticDirectory;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(err) = run(config).await {
        tracing::error!("Server error: {err}");
        std::process::exit(1);
    }
}

/// Load configuration for the current environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("OPSDESK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting OpsDesk v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Initializing shared store (provider: {})", config.cache.provider);
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let authority = Arc::new(TokenAuthority::new(&config.auth, Arc::clone(&cache)));
    let presence = PresenceRegistry::new(&config.presence, Arc::clone(&cache));
    let hub = PushHub::new(&config.push);

    if config.directory.users.is_empty() {
        tracing::warn!("Seeded directory is empty, no user can log in");
    }
    let directory: Arc<dyn UserDirectory> = Arc::new(StaticDirectory::new(&config.directory));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        cache,
        authority,
        presence,
        hub,
        directory,
    };
    let app = opsdesk_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("OpsDesk server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("OpsDesk server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
