use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

use crate::core::config::BoardConfig;
use crate::core::error::BoardError;
use crate::core::services::HttpTaskStore;
use crate::features::kanban::services::BoardController;
use crate::features::kanban::state::{BoardCell, BoardState};
use crate::models::{Task, TaskId, TaskStatus};

pub type Board = BoardController<HttpTaskStore, RwSignal<BoardState>>;

impl BoardCell for RwSignal<BoardState> {
    fn read_state<R: Default>(&self, f: impl FnOnce(&BoardState) -> R) -> R {
        self.try_with_untracked(f).unwrap_or_default()
    }

    fn update_state(&self, f: impl FnOnce(&mut BoardState)) {
        let _ = self.try_update(f);
    }
}

/// Handle the board components share.
///
/// The controller is not `Send`, so it lives in local storage and the hook
/// itself stays `Copy` for use inside reactive closures.
#[derive(Clone, Copy)]
pub struct BoardHook {
    pub state: ReadSignal<BoardState>,
    board: StoredValue<Board, LocalStorage>,
}

impl BoardHook {
    fn controller(&self) -> Option<Board> {
        self.board.try_get_value()
    }

    // Errors are already recorded in board state; the result only matters
    // to callers that await the controller directly.
    fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(Board) -> Fut + 'static,
        Fut: Future<Output = Result<(), BoardError>> + 'static,
    {
        if let Some(board) = self.controller() {
            spawn_local(async move {
                let _ = action(board).await;
            });
        }
    }

    pub fn refresh(&self) {
        self.spawn(|board| async move { board.refresh().await });
    }

    pub fn submit_form(&self) {
        self.spawn(|board| async move { board.submit_form().await });
    }

    pub fn set_form_title(&self, title: String) {
        if let Some(board) = self.controller() {
            board.set_form_title(title);
        }
    }

    pub fn set_form_description(&self, description: String) {
        if let Some(board) = self.controller() {
            board.set_form_description(description);
        }
    }

    pub fn clear_form(&self) {
        if let Some(board) = self.controller() {
            board.clear_form();
        }
    }

    pub fn delete(&self, id: TaskId) {
        self.spawn(move |board| async move { board.delete(id).await });
    }

    pub fn begin_edit(&self, task: &Task) {
        if let Some(board) = self.controller() {
            board.begin_edit(task);
        }
    }

    pub fn cancel_edit(&self) {
        if let Some(board) = self.controller() {
            board.cancel_edit();
        }
    }

    pub fn set_draft_title(&self, title: String) {
        if let Some(board) = self.controller() {
            board.set_draft_title(title);
        }
    }

    pub fn set_draft_description(&self, description: String) {
        if let Some(board) = self.controller() {
            board.set_draft_description(description);
        }
    }

    pub fn save_edit(&self) {
        self.spawn(|board| async move { board.save_edit().await });
    }

    pub fn begin_drag(&self, task: &Task) {
        if let Some(board) = self.controller() {
            board.begin_drag(task);
        }
    }

    pub fn cancel_drag(&self) {
        if let Some(board) = self.controller() {
            board.cancel_drag();
        }
    }

    /// Finish a drag over `column`. The payload is taken synchronously so a
    /// following `dragend` cannot race it.
    pub fn drop_on(&self, column: TaskStatus) {
        if let Some(board) = self.controller() {
            let pending = board.complete_drag(column);
            spawn_local(async move {
                let _ = pending.await;
            });
        }
    }
}

fn browser_confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

/// Build the board controller for this page and load the tasks once.
pub fn use_board(config: &BoardConfig) -> BoardHook {
    let state = RwSignal::new(BoardState::default());
    let store = HttpTaskStore::new(config.api_url.clone());
    log::info!("Task board using {}", store.base_url());

    let board = BoardController::new(store, state, browser_confirm);
    let hook = BoardHook {
        state: state.read_only(),
        board: StoredValue::new_local(board),
    };

    // Load tasks on mount
    hook.refresh();
    hook
}
