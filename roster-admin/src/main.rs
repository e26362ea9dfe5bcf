//! roster-admin - person record admin service
//!
//! Serves the record table (browse, filter, sort, paginate, statistics) and
//! the admin-only create, bulk import and delete operations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use roster_admin::{build_router, AppState};
use roster_common::api::AuthGate;
use roster_common::config::{resolve_config_path, ConfigOverrides, TomlConfig};
use roster_common::db::{init_database, settings, SqliteRecordStore};
use roster_common::import::RecordValidator;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for roster-admin
#[derive(Parser, Debug)]
#[command(name = "roster-admin")]
#[command(about = "Person record admin service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "ROSTER_PORT")]
    port: Option<u16>,

    /// SQLite database file (overrides config file)
    #[arg(short, long, env = "ROSTER_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read first so its log level can seed the subscriber
    let config_path = resolve_config_path(args.config.as_deref());
    let overrides = ConfigOverrides {
        config_path: args.config.clone(),
        database_path: args.database.clone(),
        port: args.port,
    };
    let config = TomlConfig::load_from(config_path.as_deref(), &overrides).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting roster-admin v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_path {
        Some(path) => info!("Loaded TOML configuration from {}", path.display()),
        None => warn!("No config file found, using compiled defaults"),
    }

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path).await.context("Failed to initialize database")?;

    let secret = if config.auth.secret.is_empty() {
        settings::get_or_init_token_secret(&pool)
            .await
            .context("Failed to load token secret")?
    } else {
        config.auth.secret.clone()
    };

    let auth = AuthGate::new(
        config.auth.username.clone(),
        config.auth.password.clone(),
        secret,
        config.auth.token_lifetime_secs,
    );
    if !auth.login_enabled() {
        warn!("No admin password configured; admin login is disabled");
    }

    let validator = RecordValidator::new(&config.validation).context("Invalid validation rules")?;
    let store = Arc::new(SqliteRecordStore::new(pool));

    let state = AppState::new(store, auth, validator)
        .with_page_size(config.page_size)
        .with_max_body_bytes(config.max_body_bytes);
    let app = build_router(state);

    let addr = format!("{}:{}", config.bind_host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("roster-admin listening on http://{}", addr);
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
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
