use std::io;

use stockroom_core::Item;
use tokio::runtime::Runtime;

use crate::{HttpService, ItemService, ServiceError};

/// Blocking wrapper around the async `HttpService`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers: the startup health wait and test fixtures.
pub struct BlockingHttpService {
    inner: HttpService,
    rt: Runtime,
}

impl BlockingHttpService {
    pub fn new(base_url: &str) -> io::Result<Self> {
        Ok(Self {
            inner: HttpService::new(base_url),
            rt: Runtime::new()?,
        })
    }

    pub fn inner(&self) -> &HttpService {
        &self.inner
    }

    pub fn health_check(&self) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.health_check())
    }

    pub fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        self.rt.block_on(self.inner.list_items())
    }

    pub fn get_item(&self, name: &str) -> Result<Item, ServiceError> {
        self.rt.block_on(self.inner.get_item(name))
    }

    pub fn create_item(&self, item: &Item) -> Result<Item, ServiceError> {
        self.rt.block_on(self.inner.create_item(item))
    }

    pub fn update_item(&self, name: &str, item: &Item) -> Result<Item, ServiceError> {
        self.rt.block_on(self.inner.update_item(name, item))
    }

    pub fn delete_item(&self, name: &str) -> Result<Item, ServiceError> {
        self.rt.block_on(self.inner.delete_item(name))
    }
}
