use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use todo_domain::{next_order, Todo, TodoId};

use crate::error::ApiError;
use crate::models::{CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest};
use crate::AppState;

/// GET /api
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hi!" }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/todos
///
/// The max-order read and the write are two separate store calls, so
/// concurrent creates can race onto the same rank. Matches the documented
/// behavior of the service; reorders repair it via the swap below.
pub async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let value = match req.value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return Err(ApiError::Validation("value is required".to_string())),
    };

    let order = next_order(state.store.max_order().await?);
    let todo = Todo::new(value, order);
    state.store.put(&todo).await?;

    tracing::info!(id = %todo.id, order, "todo created");
    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

/// GET /api/todos
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let mut todos = state.store.list().await?;
    todos.sort_by(|a, b| b.order.cmp(&a.order));
    Ok(Json(TodoListResponse { todos }))
}

/// PATCH /api/todos/{todo_id}
pub async fn update_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = TodoId::from(todo_id);
    let mut current = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("todo does not exist".to_string()))?;

    if let Some(order) = req.order {
        // Another todo may already hold the requested rank; hand it the
        // current todo's old rank so the two swap places.
        if let Some(mut conflicting) = state.store.find_by_order(order).await? {
            if conflicting.id != current.id {
                conflicting.set_order(current.order);
                state.store.put(&conflicting).await?;
            }
        }
        current.set_order(order);
    }

    if let Some(done) = req.done {
        current.set_done(done);
    }

    if let Some(value) = req.value.as_deref().map(str::trim) {
        // A blank value would break the non-empty invariant; ignore it.
        if !value.is_empty() {
            current.set_value(value);
        }
    }

    state.store.put(&current).await?;
    Ok(Json(json!({})))
}

/// DELETE /api/todos/{todo_id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = TodoId::from(todo_id);
    if state.store.get(&id).await?.is_none() {
        return Err(ApiError::NotFound("todo does not exist".to_string()));
    }

    state.store.delete(&id).await?;
    tracing::info!(%id, "todo deleted");
    Ok(Json(json!({})))
}
