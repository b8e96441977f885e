use std::future::Future;
use std::rc::Rc;

use crate::core::error::{BoardError, StoreError};
use crate::core::services::TaskStore;
use crate::features::kanban::state::{BoardCell, BoardState, TaskForm};
use crate::models::{NewTask, Task, TaskId, TaskStatus};

pub const DELETE_CONFIRMATION: &str = "Delete this task?";

/// Asks the user to confirm a destructive action.
pub type ConfirmFn = Rc<dyn Fn(&str) -> bool + 'static>;

/// Owns the board state and mirrors every change to the task service.
///
/// Local state only ever takes the service's answer: nothing is applied
/// before the request succeeds, and a failure leaves `tasks` untouched.
/// Operations may overlap; each one applies its own result when it lands.
pub struct BoardController<S, C> {
    store: Rc<S>,
    cell: C,
    confirm: ConfirmFn,
}

impl<S, C: Clone> Clone for BoardController<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            cell: self.cell.clone(),
            confirm: Rc::clone(&self.confirm),
        }
    }
}

impl<S, C> BoardController<S, C>
where
    S: TaskStore + 'static,
    C: BoardCell,
{
    pub fn new(store: S, cell: C, confirm: impl Fn(&str) -> bool + 'static) -> Self {
        Self {
            store: Rc::new(store),
            cell,
            confirm: Rc::new(confirm),
        }
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    pub fn snapshot(&self) -> BoardState {
        self.cell.read_state(BoardState::clone)
    }

    fn start_request(&self) {
        self.cell.update_state(BoardState::begin_request);
    }

    fn finish_request(&self, apply: impl FnOnce(&mut BoardState)) {
        self.cell.update_state(|state| {
            state.end_request();
            apply(state);
        });
    }

    // Record a store failure as the board's current error.
    fn fail(&self, error: BoardError, source: &StoreError) -> Result<(), BoardError> {
        log::warn!("{}: {}", error, source);
        self.finish_request(|state| state.error = Some(error));
        Err(error)
    }

    fn reject_invalid(&self) -> Result<(), BoardError> {
        self.cell.update_state(|state| state.error = Some(BoardError::Validation));
        Err(BoardError::Validation)
    }

    /// Replace the whole task list with the service's.
    pub async fn refresh(&self) -> Result<(), BoardError> {
        self.start_request();
        match self.store.list().await {
            Ok(tasks) => {
                log::info!("Loaded {} tasks", tasks.len());
                self.finish_request(|state| state.tasks = tasks);
                Ok(())
            }
            Err(e) => self.fail(BoardError::Fetch, &e),
        }
    }

    /// Create a task in the first column. The form is cleared only once
    /// the service has accepted it.
    pub async fn create(&self, title: &str, description: &str) -> Result<(), BoardError> {
        if title.trim().is_empty() {
            return self.reject_invalid();
        }
        let new_task = NewTask::new(title, description);

        self.start_request();
        match self.store.create(&new_task).await {
            Ok(task) => {
                log::info!("Created task {}", task.id);
                self.finish_request(|state| {
                    state.tasks.push(task);
                    state.form = TaskForm::default();
                });
                Ok(())
            }
            Err(e) => self.fail(BoardError::Create, &e),
        }
    }

    /// Create a task from the current form inputs.
    pub async fn submit_form(&self) -> Result<(), BoardError> {
        let form = self.cell.read_state(|state| state.form.clone());
        self.create(&form.title, &form.description).await
    }

    pub fn set_form_title(&self, title: String) {
        self.cell.update_state(|state| state.form.title = title);
    }

    pub fn set_form_description(&self, description: String) {
        self.cell.update_state(|state| state.form.description = description);
    }

    pub fn clear_form(&self) {
        self.cell.update_state(|state| {
            state.form = TaskForm::default();
            state.error = None;
        });
    }

    /// Delete after the user confirms. Declining changes nothing.
    pub async fn delete(&self, id: TaskId) -> Result<(), BoardError> {
        if !(self.confirm)(DELETE_CONFIRMATION) {
            log::debug!("Delete of task {} declined", id);
            return Ok(());
        }

        self.start_request();
        match self.store.delete(&id).await {
            Ok(()) => {
                log::info!("Deleted task {}", id);
                self.finish_request(|state| {
                    state.tasks.retain(|t| t.id != id);
                    if state.is_editing(&id) {
                        state.editing = None;
                    }
                });
                Ok(())
            }
            Err(e) => self.fail(BoardError::Delete, &e),
        }
    }

    pub fn begin_edit(&self, task: &Task) {
        let draft = task.clone();
        self.cell.update_state(|state| state.editing = Some(draft));
    }

    pub fn cancel_edit(&self) {
        self.cell.update_state(|state| state.editing = None);
    }

    pub fn set_draft_title(&self, title: String) {
        self.cell.update_state(|state| {
            if let Some(draft) = state.editing.as_mut() {
                draft.title = title;
            }
        });
    }

    pub fn set_draft_description(&self, description: String) {
        self.cell.update_state(|state| {
            if let Some(draft) = state.editing.as_mut() {
                draft.description = Some(description);
            }
        });
    }

    /// Send the open draft as a full update. The editor stays open on
    /// failure so the user can retry or cancel.
    pub async fn save_edit(&self) -> Result<(), BoardError> {
        let Some(draft) = self.cell.read_state(|state| state.editing.clone()) else {
            return Ok(());
        };
        if draft.title.trim().is_empty() {
            return self.reject_invalid();
        }

        self.start_request();
        match self.store.update(&draft).await {
            Ok(updated) => {
                log::info!("Saved task {}", updated.id);
                self.finish_request(|state| {
                    state.apply_update(updated);
                    // Another task may have been opened meanwhile.
                    if state.is_editing(&draft.id) {
                        state.editing = None;
                    }
                });
                Ok(())
            }
            Err(e) => self.fail(BoardError::Save, &e),
        }
    }

    /// Move a task to another column. The task changes column only when
    /// the service answers, and then to whatever status the service chose.
    pub async fn move_task(&self, task: Task, target: TaskStatus) -> Result<(), BoardError> {
        if task.status == target {
            return Ok(());
        }
        if task.title.trim().is_empty() {
            return self.reject_invalid();
        }
        let moved = task.with_status(target);

        self.start_request();
        match self.store.update(&moved).await {
            Ok(updated) => {
                if updated.status == target {
                    log::info!("Moved task {} to {}", updated.id, target.id());
                } else {
                    log::info!("Service kept task {} in {}", updated.id, updated.status.id());
                }
                self.finish_request(|state| {
                    state.apply_update(updated);
                });
                Ok(())
            }
            Err(e) => self.fail(BoardError::Move, &e),
        }
    }

    /// Pick up a task. The last drag to start wins.
    pub fn begin_drag(&self, task: &Task) {
        let payload = task.clone();
        self.cell.update_state(|state| state.drag = Some(payload));
    }

    /// Drop an abandoned drag.
    pub fn cancel_drag(&self) {
        self.cell.update_state(|state| state.drag = None);
    }

    /// Drop the dragged task on a column.
    ///
    /// The payload is read when this is called, not when the future is
    /// first polled, and cleared once the move has been attempted.
    pub fn complete_drag(&self, target: TaskStatus) -> impl Future<Output = Result<(), BoardError>> + 'static {
        let payload = self.cell.read_state(|state| state.drag.clone());
        let this = self.clone();
        async move {
            let Some(task) = payload else {
                return Ok(());
            };
            let result = this.move_task(task.clone(), target).await;
            this.cell.update_state(|state| {
                if state.drag.as_ref().is_some_and(|d| d.id == task.id) {
                    state.drag = None;
                }
            });
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    use crate::models::tasks_from_json;

    /// In-memory task service with switchable failures.
    #[derive(Default)]
    struct MockStore {
        tasks: RefCell<Vec<Task>>,
        next_id: Cell<i64>,
        calls: RefCell<Vec<&'static str>>,
        reject: Cell<bool>,
        // Raw list payload; overrides `tasks` when set.
        list_payload: RefCell<Option<serde_json::Value>>,
        // Status the service forces onto every update.
        forced_status: Cell<Option<TaskStatus>>,
        list_gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl MockStore {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            let next_id = tasks.len() as i64 + 1;
            Self {
                tasks: RefCell::new(tasks),
                next_id: Cell::new(next_id),
                ..Default::default()
            }
        }

        fn record(&self, call: &'static str) -> Result<(), StoreError> {
            self.calls.borrow_mut().push(call);
            if self.reject.get() {
                Err(StoreError::Rejected { status: 500 })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl TaskStore for MockStore {
        async fn list(&self) -> Result<Vec<Task>, StoreError> {
            let gate = self.list_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.record("list")?;
            if let Some(payload) = self.list_payload.borrow().clone() {
                return Ok(tasks_from_json(payload));
            }
            Ok(self.tasks.borrow().clone())
        }

        async fn create(&self, task: &NewTask) -> Result<Task, StoreError> {
            self.record("create")?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let created = Task {
                id: TaskId::Number(id),
                title: task.title.clone(),
                description: Some(task.description.clone()),
                status: task.status,
                extra: Default::default(),
            };
            self.tasks.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update(&self, task: &Task) -> Result<Task, StoreError> {
            self.record("update")?;
            let mut stored = task.clone();
            if let Some(status) = self.forced_status.get() {
                stored.status = status;
            }
            let mut tasks = self.tasks.borrow_mut();
            let slot = tasks
                .iter_mut()
                .find(|t| t.id == stored.id)
                .ok_or(StoreError::Rejected { status: 404 })?;
            *slot = stored.clone();
            Ok(stored)
        }

        async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
            self.record("delete")?;
            self.tasks.borrow_mut().retain(|t| &t.id != id);
            Ok(())
        }
    }

    type TestBoard = BoardController<MockStore, Rc<RefCell<BoardState>>>;

    fn task(id: i64, title: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::Number(id),
            title: title.to_string(),
            description: None,
            status,
            extra: Default::default(),
        }
    }

    fn seeded() -> Vec<Task> {
        vec![
            task(1, "Write docs", TaskStatus::Todo),
            task(2, "Fix login", TaskStatus::Doing),
            task(3, "Release", TaskStatus::Done),
        ]
    }

    fn board_with(store: MockStore, confirm: bool) -> TestBoard {
        BoardController::new(store, Rc::new(RefCell::new(BoardState::default())), move |_| confirm)
    }

    fn loaded_board(confirm: bool) -> TestBoard {
        let board = board_with(MockStore::with_tasks(seeded()), confirm);
        block_on(board.refresh()).unwrap();
        board
    }

    fn calls(board: &TestBoard) -> Vec<&'static str> {
        board.store.calls.borrow().clone()
    }

    fn status_of(board: &TestBoard, id: i64) -> Option<TaskStatus> {
        board.snapshot().task(&TaskId::Number(id)).map(|t| t.status)
    }

    #[test]
    fn refresh_replaces_tasks_in_service_order() {
        let board = loaded_board(true);
        let state = board.snapshot();
        assert_eq!(state.tasks, seeded());
        assert_eq!(state.error, None);
        assert!(!state.loading());
    }

    #[test]
    fn refresh_with_non_array_payload_empties_board() {
        let board = loaded_board(true);
        *board.store.list_payload.borrow_mut() = Some(json!({ "error": "internal" }));

        assert_eq!(block_on(board.refresh()), Ok(()));
        let state = board.snapshot();
        assert!(state.tasks.is_empty());
        assert_eq!(state.error, None);
    }

    #[test]
    fn failed_refresh_keeps_tasks_and_reports() {
        let board = loaded_board(true);
        board.store.reject.set(true);

        assert_eq!(block_on(board.refresh()), Err(BoardError::Fetch));
        let state = board.snapshot();
        assert_eq!(state.tasks, seeded());
        assert_eq!(state.error, Some(BoardError::Fetch));
        assert!(!state.loading());
    }

    #[test]
    fn refresh_clears_previous_error() {
        let board = loaded_board(true);
        board.store.reject.set(true);
        let _ = block_on(board.refresh());
        board.store.reject.set(false);

        block_on(board.refresh()).unwrap();
        assert_eq!(board.snapshot().error, None);
    }

    #[test]
    fn delete_clears_previous_error() {
        let board = loaded_board(true);
        let _ = block_on(board.create(" ", ""));
        assert_eq!(board.snapshot().error, Some(BoardError::Validation));

        block_on(board.delete(TaskId::Number(1))).unwrap();
        assert_eq!(board.snapshot().error, None);
    }

    #[test]
    fn save_edit_clears_previous_error() {
        let board = loaded_board(true);
        board.store.reject.set(true);
        let _ = block_on(board.delete(TaskId::Number(1)));
        assert_eq!(board.snapshot().error, Some(BoardError::Delete));
        board.store.reject.set(false);

        let original = board.snapshot().tasks[0].clone();
        board.begin_edit(&original);
        board.set_draft_title("Write better docs".into());
        block_on(board.save_edit()).unwrap();
        assert_eq!(board.snapshot().error, None);
    }

    #[test]
    fn move_clears_previous_error() {
        let board = loaded_board(true);
        board.store.reject.set(true);
        let _ = block_on(board.refresh());
        assert_eq!(board.snapshot().error, Some(BoardError::Fetch));
        board.store.reject.set(false);

        let first = board.snapshot().tasks[0].clone();
        block_on(board.move_task(first, TaskStatus::Done)).unwrap();
        let state = board.snapshot();
        assert_eq!(state.error, None);
        assert_eq!(status_of(&board, 1), Some(TaskStatus::Done));
    }

    #[test]
    fn create_with_blank_title_never_reaches_service() {
        let board = loaded_board(true);
        board.set_form_title("   ".into());

        assert_eq!(block_on(board.submit_form()), Err(BoardError::Validation));
        let state = board.snapshot();
        assert_eq!(state.tasks.len(), 3);
        assert_eq!(state.error, Some(BoardError::Validation));
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn create_appends_todo_task_and_clears_form() {
        let board = loaded_board(true);
        board.set_form_title("Buy milk".into());
        board.set_form_description("  semi-skimmed ".into());

        block_on(board.submit_form()).unwrap();
        let state = board.snapshot();
        assert_eq!(state.tasks.len(), 4);
        let created = state.tasks.last().unwrap();
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.description.as_deref(), Some("semi-skimmed"));
        assert_eq!(created.status, TaskStatus::Todo);
        assert_eq!(created.id, TaskId::Number(4));
        assert_eq!(state.form, TaskForm::default());
    }

    #[test]
    fn failed_create_keeps_form_for_retry() {
        let board = loaded_board(true);
        board.store.reject.set(true);
        board.set_form_title("Buy milk".into());

        assert_eq!(block_on(board.submit_form()), Err(BoardError::Create));
        let state = board.snapshot();
        assert_eq!(state.tasks.len(), 3);
        assert_eq!(state.form.title, "Buy milk");
        assert_eq!(state.error, Some(BoardError::Create));
    }

    #[test]
    fn clear_form_resets_inputs_and_error() {
        let board = loaded_board(true);
        board.set_form_title("x".into());
        board.set_form_description("y".into());
        let _ = block_on(board.create(" ", ""));

        board.clear_form();
        let state = board.snapshot();
        assert_eq!(state.form, TaskForm::default());
        assert_eq!(state.error, None);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let board = loaded_board(false);
        let before = board.snapshot();

        assert_eq!(block_on(board.delete(TaskId::Number(1))), Ok(()));
        assert_eq!(board.snapshot(), before);
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn confirmed_delete_removes_task() {
        let board = loaded_board(true);
        block_on(board.delete(TaskId::Number(2))).unwrap();
        assert_eq!(status_of(&board, 2), None);
        assert_eq!(board.snapshot().tasks.len(), 2);
    }

    #[test]
    fn failed_delete_keeps_task() {
        let board = loaded_board(true);
        board.store.reject.set(true);

        assert_eq!(block_on(board.delete(TaskId::Number(2))), Err(BoardError::Delete));
        assert_eq!(status_of(&board, 2), Some(TaskStatus::Doing));
        assert_eq!(board.snapshot().error, Some(BoardError::Delete));
    }

    #[test]
    fn edit_draft_is_detached_until_saved() {
        let board = loaded_board(true);
        let original = board.snapshot().tasks[0].clone();

        board.begin_edit(&original);
        board.set_draft_title("Write better docs".into());
        assert_eq!(board.snapshot().tasks[0].title, "Write docs");

        board.cancel_edit();
        let state = board.snapshot();
        assert_eq!(state.editing, None);
        assert_eq!(state.tasks[0], original);
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn save_edit_applies_service_copy_and_closes_editor() {
        let board = loaded_board(true);
        let original = board.snapshot().tasks[0].clone();
        board.begin_edit(&original);
        board.set_draft_title("Write better docs".into());
        board.set_draft_description("with examples".into());

        block_on(board.save_edit()).unwrap();
        let state = board.snapshot();
        assert_eq!(state.editing, None);
        assert_eq!(state.tasks[0].title, "Write better docs");
        assert_eq!(state.tasks[0].description.as_deref(), Some("with examples"));
        assert_eq!(state.tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn save_edit_with_blank_title_keeps_editor_open() {
        let board = loaded_board(true);
        let original = board.snapshot().tasks[0].clone();
        board.begin_edit(&original);
        board.set_draft_title(String::new());

        assert_eq!(block_on(board.save_edit()), Err(BoardError::Validation));
        let state = board.snapshot();
        assert!(state.is_editing(&original.id));
        assert_eq!(state.error, Some(BoardError::Validation));
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn failed_save_keeps_editor_open() {
        let board = loaded_board(true);
        let original = board.snapshot().tasks[1].clone();
        board.begin_edit(&original);
        board.set_draft_title("Fix logout".into());
        board.store.reject.set(true);

        assert_eq!(block_on(board.save_edit()), Err(BoardError::Save));
        let state = board.snapshot();
        assert_eq!(state.editing.as_ref().map(|d| d.title.as_str()), Some("Fix logout"));
        assert_eq!(state.tasks[1].title, "Fix login");
    }

    #[test]
    fn drag_drop_moves_task_and_clears_payload() {
        let board = loaded_board(true);
        let dragged = board.snapshot().tasks[0].clone();

        board.begin_drag(&dragged);
        block_on(board.complete_drag(TaskStatus::Doing)).unwrap();
        let state = board.snapshot();
        assert_eq!(status_of(&board, 1), Some(TaskStatus::Doing));
        assert_eq!(state.drag, None);
        assert_eq!(state.column_count(TaskStatus::Doing), 2);
    }

    #[test]
    fn rejected_move_leaves_task_in_original_column() {
        let board = loaded_board(true);
        let dragged = board.snapshot().tasks[0].clone();
        board.store.reject.set(true);

        board.begin_drag(&dragged);
        assert_eq!(block_on(board.complete_drag(TaskStatus::Doing)), Err(BoardError::Move));
        let state = board.snapshot();
        assert_eq!(status_of(&board, 1), Some(TaskStatus::Todo));
        assert_eq!(state.error, Some(BoardError::Move));
        assert_eq!(state.drag, None);
    }

    #[test]
    fn move_of_blank_titled_task_is_not_sent() {
        let board = board_with(
            MockStore::with_tasks(vec![task(1, "  ", TaskStatus::Todo)]),
            true,
        );
        block_on(board.refresh()).unwrap();
        let blank = board.snapshot().tasks[0].clone();

        board.begin_drag(&blank);
        assert_eq!(block_on(board.complete_drag(TaskStatus::Doing)), Err(BoardError::Validation));
        let state = board.snapshot();
        assert_eq!(status_of(&board, 1), Some(TaskStatus::Todo));
        assert_eq!(state.error, Some(BoardError::Validation));
        assert_eq!(state.drag, None);
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn drop_on_same_column_is_a_no_op() {
        let board = loaded_board(true);
        let dragged = board.snapshot().tasks[2].clone();

        board.begin_drag(&dragged);
        block_on(board.complete_drag(TaskStatus::Done)).unwrap();
        assert_eq!(board.snapshot().drag, None);
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn service_status_wins_over_requested_move() {
        let board = loaded_board(true);
        let dragged = board.snapshot().tasks[0].clone();
        board.store.forced_status.set(Some(TaskStatus::Done));

        block_on(board.move_task(dragged, TaskStatus::Doing)).unwrap();
        assert_eq!(status_of(&board, 1), Some(TaskStatus::Done));
    }

    #[test]
    fn drop_without_payload_does_nothing() {
        let board = loaded_board(true);
        block_on(board.complete_drag(TaskStatus::Done)).unwrap();
        assert_eq!(calls(&board), vec!["list"]);
    }

    #[test]
    fn drop_reads_payload_at_call_time() {
        let board = loaded_board(true);
        let first = board.snapshot().tasks[0].clone();
        board.begin_drag(&first);

        let pending = board.complete_drag(TaskStatus::Done);
        board.cancel_drag();
        block_on(pending).unwrap();
        assert_eq!(status_of(&board, 1), Some(TaskStatus::Done));
    }

    #[test]
    fn every_task_sits_in_one_column_after_operations() {
        let board = loaded_board(true);
        block_on(board.create("Buy milk", "")).unwrap();
        let t = board.snapshot().tasks[1].clone();
        block_on(board.move_task(t, TaskStatus::Done)).unwrap();
        block_on(board.delete(TaskId::Number(3))).unwrap();

        let state = board.snapshot();
        let total: usize = TaskStatus::all().into_iter().map(|s| state.column_count(s)).sum();
        assert_eq!(total, state.tasks.len());
    }

    #[test]
    fn other_actions_stay_responsive_during_refresh() {
        let board = loaded_board(true);
        let (open_gate, gate) = oneshot::channel();
        *board.store.list_gate.borrow_mut() = Some(gate);
        let first = board.snapshot().tasks[0].clone();

        block_on(async {
            let refresh = board.refresh();
            let interact = async {
                assert!(board.snapshot().loading());
                board.begin_edit(&first);
                assert!(board.snapshot().is_editing(&first.id));
                let _ = open_gate.send(());
            };
            let (result, ()) = futures::join!(refresh, interact);
            result.unwrap();
        });

        let state = board.snapshot();
        assert!(!state.loading());
        assert!(state.is_editing(&first.id));
    }

    #[test]
    fn loading_holds_until_last_request_finishes() {
        let board = loaded_board(true);
        let (open_gate, gate) = oneshot::channel();
        *board.store.list_gate.borrow_mut() = Some(gate);

        block_on(async {
            let refresh = board.refresh();
            let create = async {
                board.create("Buy milk", "").await.unwrap();
                // The refresh is still parked on the gate.
                assert!(board.snapshot().loading());
                let _ = open_gate.send(());
            };
            let (result, ()) = futures::join!(refresh, create);
            result.unwrap();
        });

        assert!(!board.snapshot().loading());
    }
}
