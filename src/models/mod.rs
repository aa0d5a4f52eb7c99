mod user;
mod forms;
mod task;

pub use user::{User, Identity};
pub use forms::{CredentialsForm, NewTaskForm, TaskUpdateForm, provided};
pub use task::Task;
