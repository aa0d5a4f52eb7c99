use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use crate::app::AppState;
use crate::errors::AppResult;

// Verifies the bearer token and hands the identity to the handlers as a request extension
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = state.sessions.verify(authorization)?;
    tracing::debug!("Authenticated request from user {}", identity.usuario);

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
