pub mod column;
pub mod edit_task_form;
pub mod header;
pub mod new_task_form;
pub mod task_card;

pub use column::KanbanColumn;
pub use edit_task_form::EditTaskForm;
pub use header::KanbanHeader;
pub use new_task_form::NewTaskForm;
pub use task_card::TaskCard;
