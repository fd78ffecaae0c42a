use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use stockroom_db::{Database, SqliteDatabase};
use stockroom_server::config::ServerConfig;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();

    let db: Arc<dyn Database> = if config.in_memory {
        info!("using in-memory database");
        Arc::new(SqliteDatabase::open_in_memory()?)
    } else {
        Arc::new(SqliteDatabase::open(&config.db_config()).context("failed to open database")?)
    };

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("stockroom-server listening on http://{addr}");

    stockroom_server::serve(listener, db).await
}
