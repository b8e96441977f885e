pub mod components;
pub mod hooks;
pub mod services;
pub mod state;

pub use components::*;
pub use hooks::*;
pub use services::*;
pub use state::*;
