use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use crate::{
    config::Config,
    errors::response::handle_panic,
    handlers,
    middleware,
    models::{Task, User},
    services::{AuthService, JsonStore, SessionVerifier, TaskService},
};

// Application state that can be shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub sessions: SessionVerifier,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let sessions = SessionVerifier::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_ttl_secs,
        );
        let users: Arc<JsonStore<User>> = Arc::new(JsonStore::new(&config.storage.users_file));
        let tasks: Arc<JsonStore<Task>> = Arc::new(JsonStore::new(&config.storage.tasks_file));

        tracing::info!(
            "Using stores {} and {}",
            users.path().display(),
            tasks.path().display()
        );

        Self {
            auth: AuthService::new(users, sessions.clone(), config.auth.bcrypt_cost),
            tasks: TaskService::new(tasks),
            sessions,
            max_body_size: config.server.max_body_size,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Every /tareas route sits behind the bearer token check
    let tareas = Router::new()
        .route("/tareas", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/tareas/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        .route("/", get(handlers::serve_index))
        .route("/registro", post(handlers::handle_register))
        .route("/login", post(handlers::handle_login))
        .merge(tareas)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(state.max_body_size)),
        )
        .with_state(state)
}
