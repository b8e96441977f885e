use kanban_board_ui::core::{logging, BoardConfig};
use kanban_board_ui::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = BoardConfig::from_env();
    logging::init(config.log_level);

    mount_to_body(move || view! { <App config=config /> })
}
