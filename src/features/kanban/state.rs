use std::cell::RefCell;
use std::rc::Rc;

use crate::core::error::BoardError;
use crate::models::{Task, TaskId, TaskStatus};

/// Inputs of the new-task form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
}

/// Everything the board renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    /// Service order from the last refresh, with creates appended.
    pub tasks: Vec<Task>,
    pub error: Option<BoardError>,
    /// Detached copy of the task open in the inline editor.
    pub editing: Option<Task>,
    /// Task picked up by the current drag gesture.
    pub drag: Option<Task>,
    pub form: TaskForm,
    in_flight: usize,
}

impl BoardState {
    /// True while any request is outstanding.
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn column(&self, status: TaskStatus) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    pub fn column_tasks(&self, status: TaskStatus) -> Vec<Task> {
        self.column(status).cloned().collect()
    }

    pub fn column_count(&self, status: TaskStatus) -> usize {
        self.column(status).count()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.editing.as_ref().is_some_and(|draft| &draft.id == id)
    }

    pub(crate) fn begin_request(&mut self) {
        self.error = None;
        self.in_flight += 1;
    }

    pub(crate) fn end_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Swap in the service's copy of a task. Unknown ids are ignored: the
    /// task was removed while the request was in flight.
    pub(crate) fn apply_update(&mut self, updated: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }
}

/// Shared, interior-mutable home of a [`BoardState`].
///
/// Borrows never span an await point, so overlapping operations each see
/// and update the latest state. A cell whose state has been torn down reads
/// as the default and ignores updates.
pub trait BoardCell: Clone + 'static {
    fn read_state<R: Default>(&self, f: impl FnOnce(&BoardState) -> R) -> R;
    fn update_state(&self, f: impl FnOnce(&mut BoardState));
}

impl BoardCell for Rc<RefCell<BoardState>> {
    fn read_state<R: Default>(&self, f: impl FnOnce(&BoardState) -> R) -> R {
        f(&self.borrow())
    }

    fn update_state(&self, f: impl FnOnce(&mut BoardState)) {
        f(&mut self.borrow_mut())
    }
}
