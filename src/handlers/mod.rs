mod auth;
mod task;
mod json_body;

pub use auth::{serve_index, handle_register, handle_login};
pub use task::{list_tasks, create_task, update_task, delete_task};
pub use json_body::JsonBody;
