//! Single-page Kanban board that mirrors a remote task service.
//!
//! The board controller in [`features::kanban::services`] holds all
//! behavior and is independent of the view layer; the Leptos components
//! render from its state.

pub mod app;
pub mod core;
pub mod features;
pub mod models;
pub mod pages;

pub use app::App;
