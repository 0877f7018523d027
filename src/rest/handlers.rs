use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    storage::{Storage, StorageError},
    types::{parse_todo_id, Todo, TodoFields, TodoRequest, ValidationError},
};

use super::{error::ApiError, models::HealthResponse, AppState};

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_todos<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = run_storage(&state, "list", |storage| storage.list()).await?;
    Ok(Json(todos))
}

pub async fn get_todo<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(todo_id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_todo_id(&todo_id)?;
    let todo = run_storage(&state, "get", move |storage| storage.get_by_id(id)).await?;
    Ok(Json(todo))
}

pub async fn create_todo<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let fields = parse_body(payload)?;
    let todo = run_storage(&state, "create", move |storage| storage.create(&fields)).await?;
    log::info!("Created todo {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(todo_id): Path<String>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_todo_id(&todo_id)?;
    let fields = parse_body(payload)?;
    let todo = run_storage(&state, "update", move |storage| {
        storage.update_by_id(id, &fields)
    })
    .await?;
    log::info!("Updated todo {}", todo.id);
    Ok(Json(todo))
}

pub async fn delete_todo<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(todo_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_todo_id(&todo_id)?;
    run_storage(&state, "delete", move |storage| storage.delete_by_id(id)).await?;
    log::info!("Deleted todo {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found() -> ApiError {
    ApiError::UnknownEndpoint
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn parse_body(payload: Result<Json<TodoRequest>, JsonRejection>) -> Result<TodoFields, ApiError> {
    let Json(request) = payload.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(rejection.body_text()),
        _ => ValidationError::MalformedBody(rejection.body_text()).into(),
    })?;
    Ok(request.into_fields()?)
}

/// Run a storage call on the blocking pool. SQLite I/O must not stall the
/// async workers.
async fn run_storage<S, T, F>(state: &AppState<S>, op: &'static str, f: F) -> Result<T, ApiError>
where
    S: Storage + Clone + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&S) -> Result<T, StorageError> + Send + 'static,
{
    let storage = state.storage.clone();
    let span = ::tracing::debug_span!("storage", op);
    let result = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        f(&storage)
    })
    .await
    .map_err(|err| ApiError::Persistence(format!("{op} task failed: {err}")))?;
    Ok(result?)
}
