mod json_store;
mod session;
mod auth_service;
mod task_service;

pub use json_store::{JsonStore, next_id};
pub use session::SessionVerifier;
pub use auth_service::AuthService;
pub use task_service::TaskService;
