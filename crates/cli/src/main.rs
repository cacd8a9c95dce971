//! `items-service` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — run pending database migrations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api::{AppState, ServerConfig};
use db::{DbPool, PgItemRepository};

#[derive(Parser)]
#[command(
    name = "items-service",
    about = "HTTP service for managing items backed by Postgres",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Read from the environment or a `.env` file when not passed.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
    /// Upper bound on pooled connections.
    #[arg(long, default_value_t = 10)]
    max_connections: u32,
    /// Seconds to wait when opening or checking out a connection.
    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,
}

impl DatabaseArgs {
    async fn connect(&self) -> anyhow::Result<DbPool> {
        let pool = db::pool::create_pool(
            &self.database_url,
            self.max_connections,
            Duration::from_secs(self.connect_timeout_secs),
        )
        .await
        .context("failed to connect to database")?;
        db::pool::ping(&pool).await.context("database ping failed")?;
        info!("Connected to database");
        Ok(pool)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        /// Abort any request that runs longer than this many seconds.
        #[arg(long)]
        request_timeout_secs: Option<u64>,
        /// Apply pending migrations before accepting requests.
        #[arg(long)]
        migrate: bool,
        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over `.env`.
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => warn!("Ignoring unreadable .env file: {err}"),
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, request_timeout_secs, migrate, database } => {
            let pool = database.connect().await?;
            if migrate {
                db::pool::run_migrations(&pool).await.context("migration failed")?;
            }

            let state = AppState::new(Arc::new(PgItemRepository::new(pool.clone())));
            let config = ServerConfig {
                request_timeout: request_timeout_secs.map(Duration::from_secs),
            };

            info!("Starting API server on {bind}");
            let served = api::serve(&bind, state, &config, shutdown_signal()).await;

            // Close the pool whether or not the server exited cleanly.
            pool.close().await;
            info!("Database pool closed");
            served.context("server error")?;
        }
        Command::Migrate { database } => {
            let pool = database.connect().await?;
            let migrated = db::pool::run_migrations(&pool).await;
            pool.close().await;
            migrated.context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for SIGTERM: {err}");
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
