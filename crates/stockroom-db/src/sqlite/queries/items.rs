use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use stockroom_core::Item;

use super::super::{SqliteDatabase, SqliteResultExt};
use crate::DbError;

fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

fn find_item(conn: &Connection, name: &str) -> Result<Option<Item>, DbError> {
    conn.query_row(
        "SELECT name, description FROM items WHERE name = ?1",
        params![name],
        row_to_item,
    )
    .optional()
    .to_db()
}

fn not_found(name: &str) -> DbError {
    DbError::NotFound(format!("item '{name}'"))
}

impl SqliteDatabase {
    pub fn list_items_sync(&self) -> Result<Vec<Item>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT name, description FROM items ORDER BY id")
                .to_db()?;
            let items = stmt
                .query_map([], row_to_item)
                .to_db()?
                .collect::<Result<Vec<_>, _>>()
                .to_db()?;
            Ok(items)
        })
    }

    pub fn get_item_sync(&self, name: &str) -> Result<Item, DbError> {
        self.with_conn(|conn| find_item(conn, name)?.ok_or_else(|| not_found(name)))
    }

    pub fn create_item_sync(&self, item: &Item) -> Result<Item, DbError> {
        self.with_conn(|conn| {
            if find_item(conn, &item.name)?.is_some() {
                return Err(DbError::Conflict(format!("item '{}'", item.name)));
            }
            let now = Utc::now();
            conn.execute(
                "INSERT INTO items (name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![item.name, item.description, now, now],
            )
            .to_db()?;
            debug!(name = %item.name, "inserted item");
            find_item(conn, &item.name)?.ok_or_else(|| not_found(&item.name))
        })
    }

    pub fn update_item_sync(&self, name: &str, item: &Item) -> Result<Item, DbError> {
        self.with_conn(|conn| {
            if find_item(conn, name)?.is_none() {
                return Err(not_found(name));
            }
            if item.name != name && find_item(conn, &item.name)?.is_some() {
                return Err(DbError::Conflict(format!("item '{}'", item.name)));
            }
            conn.execute(
                "UPDATE items SET name = ?1, description = ?2, updated_at = ?3 WHERE name = ?4",
                params![item.name, item.description, Utc::now(), name],
            )
            .to_db()?;
            find_item(conn, &item.name)?.ok_or_else(|| not_found(&item.name))
        })
    }

    pub fn delete_item_sync(&self, name: &str) -> Result<Item, DbError> {
        self.with_conn(|conn| {
            let item = find_item(conn, name)?.ok_or_else(|| not_found(name))?;
            conn.execute("DELETE FROM items WHERE name = ?1", params![name])
                .to_db()?;
            Ok(item)
        })
    }
}
