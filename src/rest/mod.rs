use std::net::SocketAddr;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::storage::Storage;

mod error;
mod handlers;
pub mod models;

pub use error::ApiError;
use handlers::{
    create_todo, delete_todo, get_todo, health, list_todos, method_not_allowed, not_found,
    update_todo,
};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub started_at: std::time::SystemTime,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(storage: S) -> Router {
    let state = AppState {
        storage,
        started_at: std::time::SystemTime::now(),
    };

    Router::new()
        .route("/health", get(health::<S>))
        .route("/api/todos", get(list_todos::<S>))
        .route("/api/todo/create", post(create_todo::<S>))
        .route("/api/todo/:todo_id", get(get_todo::<S>))
        .route("/api/todo/update/:todo_id", put(update_todo::<S>))
        .route("/api/todo/delete/:todo_id", delete(delete_todo::<S>))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(storage);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
