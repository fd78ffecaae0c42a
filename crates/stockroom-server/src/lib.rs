pub mod config;
mod routes;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use stockroom_db::Database;
use stockroom_service::LocalService;
use tokio::net::TcpListener;

pub use routes::{build_router, AppState, InnerAppState};

pub async fn serve(listener: TcpListener, db: Arc<dyn Database>) -> Result<()> {
    let service = LocalService::new(db);
    let app = build_router(service);
    axum::serve(listener, app).await?;
    Ok(())
}
