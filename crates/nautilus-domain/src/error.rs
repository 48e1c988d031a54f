use thiserror::Error;

/// Request-level failures. Every request path resolves to one of these or to
/// an [`crate::IngestOutcome`]; nothing propagates past the boundary as a
/// raw fault.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("document store is not available")]
    StoreUnavailable,

    #[error("database query failed")]
    QueryFailed,
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Store-level failures reported by [`crate::ReadingStore`] implementations.
///
/// `Unavailable` means no live connection existed when the operation was
/// attempted; `Operation` means a live connection existed but the specific
/// insert/find/count failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document store is not connected")]
    Unavailable,

    #[error("store operation failed: {0}")]
    Operation(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
