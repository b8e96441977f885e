use leptos::prelude::*;
use crate::features::kanban::components::{EditTaskForm, TaskCard};
use crate::features::kanban::hooks::BoardHook;
use crate::models::TaskStatus;

#[component]
pub fn KanbanColumn(#[prop(into)] status: TaskStatus, board: BoardHook) -> impl IntoView {
    let state = board.state;

    // Re-render the cards only when this column's tasks or the edited task
    // change, not on every keystroke in a form.
    let column = Memo::new(move |_| {
        state.with(|s| {
            let editing = s.editing.as_ref().map(|d| d.id.clone());
            (s.column_tasks(status), editing)
        })
    });

    view! {
        <div
            class="kanban-column"
            data-column=status.id()
            on:dragover=move |ev| ev.prevent_default()
            on:drop=move |ev| {
                ev.prevent_default();
                board.drop_on(status);
            }
        >
            <div class="column-header">
                <h3>{status.as_str()}</h3>
                <span class="task-count">{move || column.with(|(tasks, _)| tasks.len())}</span>
            </div>
            <div class="column-content">
                {move || {
                    column.with(|(tasks, editing)| {
                        tasks.iter()
                            .cloned()
                            .map(|task| {
                                if editing.as_ref() == Some(&task.id) {
                                    view! { <EditTaskForm board=board /> }.into_any()
                                } else {
                                    view! { <TaskCard task=task board=board /> }.into_any()
                                }
                            })
                            .collect::<Vec<_>>()
                    })
                }}
            </div>
        </div>
    }
}
