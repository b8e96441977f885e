use leptos::ev;
use leptos::prelude::*;
use crate::features::kanban::hooks::BoardHook;

/// Inline editor for the draft held in board state.
#[component]
pub fn EditTaskForm(board: BoardHook) -> impl IntoView {
    let state = board.state;
    let draft_title = move || state.with(|s| s.editing.as_ref().map(|d| d.title.clone()).unwrap_or_default());
    let draft_description = move || {
        state.with(|s| {
            s.editing
                .as_ref()
                .and_then(|d| d.description.clone())
                .unwrap_or_default()
        })
    };

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        board.save_edit();
    };

    view! {
        <form class="task-card edit-form" on:submit=handle_submit>
            <div class="form-group">
                <input
                    type="text"
                    placeholder="Task title..."
                    prop:value=draft_title
                    on:input=move |ev| board.set_draft_title(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <textarea
                    placeholder="Task description..."
                    rows="3"
                    prop:value=draft_description
                    on:input=move |ev| board.set_draft_description(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="edit-buttons">
                <button type="submit" class="btn-primary" disabled=move || state.with(|s| s.loading())>"Save"</button>
                <button type="button" class="btn-secondary" on:click=move |_| board.cancel_edit()>"Cancel"</button>
            </div>
        </form>
    }
}
