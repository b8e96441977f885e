use leptos::ev;
use leptos::prelude::*;
use crate::features::kanban::hooks::BoardHook;

#[component]
pub fn NewTaskForm(board: BoardHook) -> impl IntoView {
    let state = board.state;
    let loading = move || state.with(|s| s.loading());

    let handle_submit = move |ev: ev::SubmitEvent| {
        // Prevent the default form submission behavior (page reload)
        ev.prevent_default();
        board.submit_form();
    };

    view! {
        <form class="new-task" on:submit=handle_submit>
            <div class="form-group">
                <input
                    type="text"
                    placeholder="Title *"
                    prop:value=move || state.with(|s| s.form.title.clone())
                    on:input=move |ev| board.set_form_title(event_target_value(&ev))
                    disabled=loading
                />
            </div>
            <div class="form-group">
                <textarea
                    placeholder="Description (optional)"
                    rows="3"
                    prop:value=move || state.with(|s| s.form.description.clone())
                    on:input=move |ev| board.set_form_description(event_target_value(&ev))
                    disabled=loading
                ></textarea>
            </div>
            <div class="form-actions">
                <button type="submit" class="btn-primary" disabled=loading>
                    {move || if loading() { "Saving..." } else { "Add" }}
                </button>
                <button type="button" class="btn-secondary" disabled=loading on:click=move |_| board.clear_form()>
                    "Clear"
                </button>
            </div>
        </form>
    }
}
