use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use crate::app::AppState;
use crate::handlers::JsonBody;
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, NewTaskForm, TaskUpdateForm};

pub async fn list_tasks(State(state): State<AppState>) -> AppResult<Response> {
    let tasks = state.tasks.list().await?;
    tracing::trace!("Listing {} tasks", tasks.len());
    Ok(Json(tasks).into_response())
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    JsonBody(form): JsonBody<NewTaskForm>,
) -> AppResult<Response> {
    let task = state.tasks.create(form.titulo, form.descripcion).await?;
    tracing::info!("User {} created task {}", identity.usuario, task.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Tarea creada exitosamente", "tarea": task })),
    )
        .into_response())
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    JsonBody(form): JsonBody<TaskUpdateForm>,
) -> AppResult<Response> {
    let id = parse_task_id(&id)?;
    let task = state.tasks.update(id, form.titulo, form.descripcion).await?;
    tracing::info!("User {} updated task {}", identity.usuario, id);

    Ok(Json(json!({ "message": "Tarea actualizada exitosamente", "tarea": task })).into_response())
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_task_id(&id)?;
    state.tasks.delete(id).await?;
    tracing::info!("User {} deleted task {}", identity.usuario, id);

    Ok(Json(json!({ "message": "Tarea eliminada exitosamente" })).into_response())
}

// A path segment that is not a task id cannot name an existing task
fn parse_task_id(raw: &str) -> AppResult<u64> {
    raw.parse().map_err(|_| AppError::NotFound(raw.to_string()))
}
