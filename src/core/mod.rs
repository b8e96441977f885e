pub mod config;
pub mod error;
pub mod logging;
pub mod services;

pub use config::BoardConfig;
pub use error::{BoardError, StoreError};
