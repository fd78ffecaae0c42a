#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::path::PathBuf;

use async_trait::async_trait;
use stockroom_core::Item;
use thiserror::Error;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the backing store lives. `None` means the default data directory.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    pub sqlite_path: Option<String>,
}

/// Storage for the item collection.
///
/// Items are addressed by `name`; there is no surrogate key on the API surface.
#[async_trait]
pub trait Database: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, DbError>;
    async fn get_item(&self, name: &str) -> Result<Item, DbError>;
    /// Fails with `Conflict` if the name is taken.
    async fn create_item(&self, item: &Item) -> Result<Item, DbError>;
    /// Overwrites both fields of the item stored under `name`.
    async fn update_item(&self, name: &str, item: &Item) -> Result<Item, DbError>;
    /// Returns the record that was removed.
    async fn delete_item(&self, name: &str) -> Result<Item, DbError>;
}

/// `$XDG_DATA_HOME/stockroom`, falling back to `~/.local/share/stockroom`.
pub fn data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("stockroom")
}
