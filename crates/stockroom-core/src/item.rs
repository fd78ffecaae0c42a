use serde::{Deserialize, Deserializer, Serialize};

use crate::StockroomError;

pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const ITEM_EXISTS: &str = "Item with this name already exists";
pub const ITEM_CREATED: &str = "Item created successfully";
pub const ITEM_UPDATED: &str = "Item updated successfully";
pub const ITEM_DELETED: &str = "Item deleted successfully";

/// An inventory item. `name` is the lookup key for every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), StockroomError> {
        if self.name.trim().is_empty() {
            return Err(StockroomError::InvalidInput("name must not be empty".into()));
        }
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// `GET /items/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEnvelope {
    pub item: Item,
}

/// Acknowledgement returned by create, update and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAck {
    #[serde(default)]
    pub message: String,
    pub item: Item,
}

impl ItemAck {
    pub fn new(message: &str, item: Item) -> Self {
        Self {
            message: message.to_string(),
            item,
        }
    }
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
