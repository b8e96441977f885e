use leptos::prelude::*;
use crate::features::kanban::hooks::BoardHook;

#[component]
pub fn KanbanHeader(board: BoardHook) -> impl IntoView {
    let state = board.state;

    view! {
        <header class="kanban-header">
            <div class="kanban-header-left">
                <h1>"Mini Kanban"</h1>
            </div>
            <div class="kanban-actions">
                <button
                    class="btn-secondary kanban-header-btn"
                    title="Reload tasks"
                    disabled=move || state.with(|s| s.loading())
                    on:click=move |_| board.refresh()
                >"⟳"</button>
            </div>
        </header>
        {move || {
            state.with(|s| s.error).map(|error| view! { <div class="error">{error.to_string()}</div> })
        }}
        <Show when=move || state.with(|s| s.loading())>
            <div class="loading">"⏳ Loading..."</div>
        </Show>
    }
}
