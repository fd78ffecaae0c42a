pub(crate) mod migrations;
pub mod queries;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;
use stockroom_core::Item;

use crate::{Database, DbConfig, DbError};

/// Extension trait that converts `rusqlite::Result<T>` into `Result<T, DbError>`.
///
/// `DbError` does not carry a rusqlite variant, so every rusqlite call inside the
/// query modules maps through `.to_db()?`.
pub(crate) trait SqliteResultExt<T> {
    fn to_db(self) -> Result<T, DbError>;
}

impl<T> SqliteResultExt<T> for rusqlite::Result<T> {
    fn to_db(self) -> Result<T, DbError> {
        self.map_err(map_sqlite_err)
    }
}

#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        let path = config
            .sqlite_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| crate::data_dir().join("stockroom.db"));
        std::fs::create_dir_all(path.parent().unwrap_or(Path::new(".")))?;
        Self::open_path(&path)
    }

    pub fn open_path(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path).to_db()?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;",
        )
        .to_db()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().to_db()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DbError::Internal("lock poisoned".into()))?;
        f(&conn)
    }

    fn run_migrations(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            migrations::run(conn)?;
            Ok(())
        })
    }
}

/// Map a `rusqlite::Error` into a `DbError::Internal`.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> DbError {
    DbError::Internal(e.to_string())
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn list_items(&self) -> Result<Vec<Item>, DbError> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || db.list_items_sync())
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }

    async fn get_item(&self, name: &str) -> Result<Item, DbError> {
        let db = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || db.get_item_sync(&name))
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }

    async fn create_item(&self, item: &Item) -> Result<Item, DbError> {
        let db = self.clone();
        let item = item.clone();
        tokio::task::spawn_blocking(move || db.create_item_sync(&item))
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }

    async fn update_item(&self, name: &str, item: &Item) -> Result<Item, DbError> {
        let db = self.clone();
        let name = name.to_string();
        let item = item.clone();
        tokio::task::spawn_blocking(move || db.update_item_sync(&name, &item))
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }

    async fn delete_item(&self, name: &str) -> Result<Item, DbError> {
        let db = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || db.delete_item_sync(&name))
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_returns_working_db() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT count(*) FROM sqlite_master WHERE name = 'items'",
                    [],
                    |row| row.get(0),
                )
                .to_db()?;
            assert_eq!(count, 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn open_path_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("test.db");
        assert!(!db_path.exists());

        let _db = SqliteDatabase::open_path(&db_path).unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn reopening_keeps_items() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DbConfig {
            sqlite_path: Some(tmp.path().join("nested/stock.db").to_string_lossy().into()),
        };

        let db = SqliteDatabase::open(&config).unwrap();
        db.create_item_sync(&Item::new("widget", "blue")).unwrap();
        drop(db);

        let db = SqliteDatabase::open(&config).unwrap();
        assert_eq!(db.get_item_sync("widget").unwrap().description, "blue");
    }
}
