use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use stockroom_core::item::{
    ErrorDetail, ItemAck, ItemEnvelope, ItemList, ITEM_CREATED, ITEM_DELETED, ITEM_EXISTS,
    ITEM_NOT_FOUND, ITEM_UPDATED,
};
use stockroom_core::Item;
use stockroom_service::{ItemService, ServiceError};
use tracing::{error, info, warn};

use super::AppState;

type ApiError = (StatusCode, Json<ErrorDetail>);

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{name}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

async fn list_items(State(state): State<AppState>) -> Result<Json<ItemList>, ApiError> {
    info!("listing items");
    state
        .service
        .list_items()
        .await
        .map(|items| Json(ItemList { items }))
        .map_err(|e| to_error("list", "*", e))
}

async fn get_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ItemEnvelope>, ApiError> {
    let item = state
        .service
        .get_item(&name)
        .await
        .map_err(|e| to_error("get", &name, e))?;
    info!("item retrieved: {name}");
    Ok(Json(ItemEnvelope { item }))
}

async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<Item>,
) -> Result<(StatusCode, Json<ItemAck>), ApiError> {
    let item = state
        .service
        .create_item(&input)
        .await
        .map_err(|e| to_error("create", &input.name, e))?;
    info!("item created: {}", item.name);
    Ok((StatusCode::CREATED, Json(ItemAck::new(ITEM_CREATED, item))))
}

async fn update_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<Item>,
) -> Result<Json<ItemAck>, ApiError> {
    let item = state
        .service
        .update_item(&name, &input)
        .await
        .map_err(|e| to_error("update", &name, e))?;
    info!("item updated: {name}");
    Ok(Json(ItemAck::new(ITEM_UPDATED, item)))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ItemAck>, ApiError> {
    let item = state
        .service
        .delete_item(&name)
        .await
        .map_err(|e| to_error("delete", &name, e))?;
    info!("item deleted: {name}");
    Ok(Json(ItemAck::new(ITEM_DELETED, item)))
}

fn to_error(op: &str, name: &str, e: ServiceError) -> ApiError {
    let (status, detail) = match &e {
        ServiceError::NotFound(_) => {
            warn!("{op} failed, item not found: {name}");
            (StatusCode::NOT_FOUND, ITEM_NOT_FOUND.to_string())
        }
        ServiceError::Conflict(_) => {
            warn!("{op} failed, duplicate item: {name}");
            (StatusCode::CONFLICT, ITEM_EXISTS.to_string())
        }
        ServiceError::InvalidInput(msg) => {
            warn!("{op} rejected: {msg}");
            (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
        }
        ServiceError::Server { status, message } => {
            error!("{op} failed: {e}");
            (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message.clone(),
            )
        }
        ServiceError::Network(_) | ServiceError::Internal(_) => {
            error!("{op} failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    };
    (status, Json(ErrorDetail { detail }))
}
