pub mod task;

pub use task::{tasks_from_json, NewTask, Task, TaskId, TaskStatus};
