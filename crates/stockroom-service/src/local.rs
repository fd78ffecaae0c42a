use std::sync::Arc;

use async_trait::async_trait;
use stockroom_core::Item;
use stockroom_db::{Database, DbError};

use crate::{ItemService, ServiceError};

/// In-process implementation backed by a `Database`.
#[derive(Clone)]
pub struct LocalService {
    db: Arc<dyn Database>,
}

impl LocalService {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(msg) => ServiceError::NotFound(msg),
            DbError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
impl ItemService for LocalService {
    async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.db.list_items().await?)
    }

    async fn get_item(&self, name: &str) -> Result<Item, ServiceError> {
        Ok(self.db.get_item(name).await?)
    }

    async fn create_item(&self, item: &Item) -> Result<Item, ServiceError> {
        item.validate()?;
        Ok(self.db.create_item(item).await?)
    }

    async fn update_item(&self, name: &str, item: &Item) -> Result<Item, ServiceError> {
        item.validate()?;
        Ok(self.db.update_item(name, item).await?)
    }

    async fn delete_item(&self, name: &str) -> Result<Item, ServiceError> {
        Ok(self.db.delete_item(name).await?)
    }
}
