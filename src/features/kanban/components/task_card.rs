use leptos::prelude::*;
use crate::features::kanban::hooks::BoardHook;
use crate::models::Task;

#[component]
pub fn TaskCard(#[prop(into)] task: Task, board: BoardHook) -> impl IntoView {
    let task_for_drag = task.clone();
    let task_for_edit = task.clone();
    let task_id = task.id.clone();
    let description = task.has_description().then(|| task.description.clone().unwrap_or_default());

    view! {
        <div
            class="task-card"
            draggable="true"
            on:dragstart=move |ev| {
                // Firefox only starts a drag once some data is attached
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &task_for_drag.id.to_string());
                }
                board.begin_drag(&task_for_drag);
            }
            on:dragend=move |ev| {
                let abandoned = ev.data_transfer().map(|dt| dt.drop_effect() == "none").unwrap_or(true);
                if abandoned {
                    board.cancel_drag();
                }
            }
        >
            <div class="task-content">
                <h4>{task.title.clone()}</h4>
                {description.map(|d| view! { <p class="desc">{d}</p> })}
            </div>
            <div class="task-buttons">
                <button class="task-action-btn edit-btn" title="Edit" on:click=move |_| board.begin_edit(&task_for_edit)>
                    "✎"
                </button>
                <button class="task-action-btn delete-btn" title="Delete" on:click=move |_| board.delete(task_id.clone())>
                    "🗑"
                </button>
            </div>
        </div>
    }
}
