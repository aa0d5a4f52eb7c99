use std::any::Any;

use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use crate::errors::AppError;

const INTERNAL_MESSAGE: &str = "Error interno del servidor";

// The IntoResponse trait implementation converts AppError into a JSON `{ message }` response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!("Internal error: {}", self);
            return internal_error();
        }

        let (status, message) = match &self {
            // Registration and login failures are bad requests
            AppError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                "Usuario y contraseña son obligatorios".to_string(),
            ),
            AppError::DuplicateUsername => (
                StatusCode::BAD_REQUEST,
                "El usuario ya existe".to_string(),
            ),
            AppError::UserNotFound => (
                StatusCode::BAD_REQUEST,
                "Usuario no encontrado".to_string(),
            ),
            AppError::InvalidSecret => (
                StatusCode::BAD_REQUEST,
                "Contraseña incorrecta".to_string(),
            ),

            // No token at all is unauthorized, a bad one is forbidden
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Token no proporcionado".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::FORBIDDEN,
                "Token inválido o expirado".to_string(),
            ),

            AppError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Título y descripción son obligatorios".to_string(),
            ),
            AppError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Tarea {} no encontrada", id),
            ),

            AppError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                "Cuerpo de la petición inválido".to_string(),
            ),
            AppError::BodyTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Cuerpo de la petición demasiado grande".to_string(),
            ),

            _ => return internal_error(),
        };

        tracing::debug!("Request rejected: {}", self);
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::BodyTooLarge
        } else {
            AppError::InvalidBody(rejection.body_text())
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": INTERNAL_MESSAGE })),
    )
        .into_response()
}

// Used by CatchPanicLayer so a panicking handler still gets the generic 500 body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);
    internal_error()
}
