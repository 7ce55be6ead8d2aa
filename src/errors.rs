use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or rendering an inventory.
///
/// Parsing itself never fails: problems with the inventory content are
/// reported as [`ValidationError`](crate::diagnostics::ValidationError)s.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// No inventory file at the resolved location.
    #[error("no inventory file found at {}", path.display())]
    NotFound { path: PathBuf },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, InventoryError>`.
pub type Result<T> = std::result::Result<T, InventoryError>;
