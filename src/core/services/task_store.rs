use async_trait::async_trait;

use crate::core::error::StoreError;
use crate::models::{NewTask, Task, TaskId};

/// Remote task resource the board mirrors its state to.
///
/// Futures are not `Send`: the board runs on the browser's single thread.
#[async_trait(?Send)]
pub trait TaskStore {
    /// Fetch every task, in service order.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Create a task; the returned task carries the service-assigned id.
    async fn create(&self, task: &NewTask) -> Result<Task, StoreError>;

    /// Replace a task; the service may alter fields in its response.
    async fn update(&self, task: &Task) -> Result<Task, StoreError>;

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError>;
}
