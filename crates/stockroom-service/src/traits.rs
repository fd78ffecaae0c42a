use async_trait::async_trait;
use stockroom_core::Item;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Any other non-2xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<stockroom_core::StockroomError> for ServiceError {
    fn from(e: stockroom_core::StockroomError) -> Self {
        match e {
            stockroom_core::StockroomError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
        }
    }
}

/// Abstraction over the item API.
///
/// The TUI programs against this trait through `HttpService`; the server
/// exposes `LocalService` over HTTP. Items are addressed by name.
#[async_trait]
pub trait ItemService: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, ServiceError>;
    async fn get_item(&self, name: &str) -> Result<Item, ServiceError>;
    async fn create_item(&self, item: &Item) -> Result<Item, ServiceError>;
    async fn update_item(&self, name: &str, item: &Item) -> Result<Item, ServiceError>;
    async fn delete_item(&self, name: &str) -> Result<Item, ServiceError>;
}
