use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Resource id must not be empty")]
    EmptyId,
}
