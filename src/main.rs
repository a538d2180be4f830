//! Folio Server: portfolio backend with batch certificate uploads.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use folio_api::{AppState, build_router};
use folio_core::config::{AppConfig, DatabaseBackend};
use folio_core::error::AppError;
use folio_database::migration::run_migrations;
use folio_database::{DatabasePool, Repositories};
use folio_service::AuthService;
use folio_storage::LocalObjectStore;

/// Folio: portfolio content and certificate uploads over HTTP
#[derive(Debug, Parser)]
#[command(name = "folio-server", version, about, long_about = None)]
struct Cli {
    /// Configuration overlay to load (`config/{env}.toml`); defaults to `$FOLIO_ENV` or `development`
    #[arg(short, long)]
    env: Option<String>,

    /// Subcommand to execute; `serve` when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Create the account used to manage the portfolio
    CreateUser {
        /// Login email
        #[arg(long)]
        email: String,
        /// Login password
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.env.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run(config).await,
        Command::Migrate => migrate(&config).await,
        Command::CreateUser { email, password } => create_user(&config, &email, &password).await,
    };

    if let Err(e) = result {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration(env: Option<&str>) -> Result<AppConfig, AppError> {
    let env = env
        .map(str::to_string)
        .or_else(|| std::env::var("FOLIO_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    AppConfig::load(&env)
}

/// Initialize tracing/logging
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
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Object store ─────────────────────────────────────
    let object_store = LocalObjectStore::new(&config.storage.upload_dir).await?;
    tracing::info!(root = %object_store.root().display(), "Object store ready");

    // ── Step 2: Repositories (connect + migrate) ─────────────────
    tracing::info!(backend = ?config.database.backend, "Initializing repositories...");
    let repositories = Repositories::from_config(&config.database).await?;

    // ── Step 3: Services and router ──────────────────────────────
    let addr = config.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, repositories.clone(), Arc::new(object_store));
    let shutdown = state.shutdown.clone();
    let app = build_router(state);

    // ── Step 4: Serve until signalled ────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Folio server listening on {}", addr);

    let signal_token = shutdown.clone();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        signal_token.cancel();
    });

    tokio::select! {
        result = async { server.await } => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = grace_expired(&shutdown, grace) => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Grace period elapsed; dropping open connections");
        }
    }

    // ── Step 5: Release resources ────────────────────────────────
    repositories.close().await;
    tracing::info!("Folio server shut down gracefully");
    Ok(())
}

/// Resolves `grace` after shutdown begins.
async fn grace_expired(shutdown: &CancellationToken, grace: Duration) {
    shutdown.cancelled().await;
    tokio::time::sleep(grace).await;
}

/// `migrate` subcommand
async fn migrate(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend != DatabaseBackend::Sqlite {
        return Err(AppError::configuration(
            "migrate requires the sqlite database backend",
        ));
    }

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;
    db.close().await;
    tracing::info!("Database migrations complete");
    Ok(())
}

/// `create-user` subcommand
async fn create_user(config: &AppConfig, email: &str, password: &str) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        tracing::warn!("Creating a user in the memory backend; it is lost when this process exits");
    }

    let repositories = Repositories::from_config(&config.database).await?;
    let auth = AuthService::new(
        Arc::clone(&repositories.auth),
        config.auth.session_ttl_seconds,
    );
    let user = auth.create_user(email, password).await?;
    repositories.close().await;

    println!("Created user {} ({})", user.email, user.id);
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
