pub mod health;
pub mod items;

use std::sync::Arc;

use axum::Router;
use stockroom_service::LocalService;
use tower_http::cors::CorsLayer;

pub struct InnerAppState {
    pub service: LocalService,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(service: LocalService) -> Router {
    let state = Arc::new(InnerAppState { service });

    Router::new()
        .merge(health::routes())
        .merge(items::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
