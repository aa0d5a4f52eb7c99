use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use crate::app::AppState;
use crate::handlers::JsonBody;
use crate::errors::AppResult;
use crate::models::CredentialsForm;

pub async fn serve_index() -> &'static str {
    "Servicio de tareas en funcionamiento."
}

pub async fn handle_register(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<CredentialsForm>,
) -> AppResult<Response> {
    let id = state.auth.register(form.usuario, form.contrasena).await?;
    tracing::debug!("Registration completed for id {}", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Usuario registrado exitosamente" })),
    )
        .into_response())
}

pub async fn handle_login(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<CredentialsForm>,
) -> AppResult<Response> {
    let token = state.auth.login(form.usuario, form.contrasena).await?;
    Ok(Json(json!({ "token": token })).into_response())
}
