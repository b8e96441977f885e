use thiserror::Error;

/// Failure talking to the task service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to task service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("task service rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("could not decode task service response: {0}")]
    Decode(String),
}

/// User-facing outcome of a failed board operation.
///
/// Transport failures and rejections collapse into one variant per action;
/// the underlying [`StoreError`] is logged, not shown.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Title is required")]
    Validation,
    #[error("Failed to load tasks")]
    Fetch,
    #[error("Failed to create task")]
    Create,
    #[error("Failed to delete task")]
    Delete,
    #[error("Failed to save changes")]
    Save,
    #[error("Failed to move task")]
    Move,
}
