pub mod http_store;
pub mod task_store;

pub use http_store::*;
pub use task_store::*;
