use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use stockroom_db::DbConfig;

#[derive(Debug, Parser)]
#[command(name = "stockroom-server", about = "Stockroom inventory API server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "STOCKROOM_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "STOCKROOM_PORT", default_value = "8000")]
    pub port: u16,

    /// SQLite database path (defaults to the user data directory)
    #[arg(long, env = "STOCKROOM_DB")]
    pub db: Option<String>,

    /// Keep everything in memory; nothing survives a restart
    #[arg(long, conflicts_with = "db")]
    pub in_memory: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            sqlite_path: self.db.clone(),
        }
    }
}
