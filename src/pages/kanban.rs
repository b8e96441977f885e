use leptos::prelude::*;
use crate::core::config::BoardConfig;
use crate::features::kanban::{use_board, KanbanColumn, KanbanHeader, NewTaskForm};
use crate::models::TaskStatus;

#[component]
pub fn Kanban(config: BoardConfig) -> impl IntoView {
    // Controller, state signal and the initial load
    let board = use_board(&config);

    view! {
        <div class="kanban-page">
            <div class="main-content">
                <KanbanHeader board=board />
                <NewTaskForm board=board />
                <div class="kanban-board">
                    {TaskStatus::all()
                        .into_iter()
                        .map(|status| view! { <KanbanColumn status=status board=board /> })
                        .collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}
