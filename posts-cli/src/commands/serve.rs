//! HTTP server command
//!
//! Picks a store backend, prepares it, and runs the server until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use posts_server::db::{create_pool_with_options, migrations, PgPostRepo};
use posts_server::http::server::DEFAULT_TIMEOUT_SECS;
use posts_server::{run_server, MemoryStore, PostStore, ServerConfig};

/// Where posts are kept
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Process memory, lost on restart
    Memory,
    /// Postgres `posts` table
    Postgres,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "POSTS_BIND", default_value = "127.0.0.1:7000")]
    pub bind: SocketAddr,

    /// Storage backend
    #[arg(long, value_enum, env = "POSTS_BACKEND", default_value = "memory")]
    pub backend: Backend,

    /// Database URL (postgres backend only)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "POSTS_MAX_CONNECTIONS", default_value_t = posts_server::db::pool::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, env = "POSTS_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

async fn open_postgres(database_url: &str, max_connections: u32) -> Result<PgPostRepo> {
    let pool = create_pool_with_options(database_url, max_connections)
        .await
        .context("Failed to create database pool")?;

    // Startup continues on migration failure; the table may already exist
    if let Err(e) = migrations::run(&pool).await {
        tracing::warn!("migrations failed: {}", e);
    }

    Ok(PgPostRepo::new(pool))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let store: Arc<dyn PostStore> = match args.backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Postgres => {
            let url = args
                .database_url
                .as_deref()
                .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;
            Arc::new(open_postgres(url, args.max_connections).await?)
        }
    };

    tracing::info!(backend = ?args.backend, "Starting posts server on {}", config.bind_addr);

    run_server(store, config).await.context("Server error")?;

    Ok(())
}
