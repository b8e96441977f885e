pub mod board_controller;

pub use board_controller::*;
