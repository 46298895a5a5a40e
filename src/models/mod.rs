pub mod task;
pub mod user;

pub use task::{Task, TaskForm, TaskId};
pub use user::{Credentials, CredentialsForm, UserId};
