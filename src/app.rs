use leptos::prelude::*;
use crate::core::config::BoardConfig;
use crate::pages::Kanban;

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    view! {
        <main class="app">
            <Kanban config=config />
        </main>
    }
}
