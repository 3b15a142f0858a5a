//! Error types for the formwork metadata engine

use crate::kind::ResourceKind;
use thiserror::Error;

/// Repository-level errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: String },

    #[error("specifying @id for new resources is not allowed")]
    IdentifierNotAllowed,

    #[error("you must specify @id when importing resources")]
    MissingRequiredIdentifier,

    #[error("it is not allowed to specify parameter 'fieldNames' and also set 'summary' to true")]
    ConflictingProjectionModes,

    #[error("parameter 'limit' must be greater than zero, got {0}")]
    InvalidLimit(i64),

    #[error("parameter 'offset' must not be negative, got {0}")]
    InvalidOffset(i64),

    #[error("parameter 'limit' must be at most {max}, got {limit}")]
    LimitExceedsMaximum { limit: i64, max: i64 },

    #[error("parameter 'offset' must be smaller than the total count of objects, which is {total}")]
    OffsetBeyondTotal { offset: i64, total: u64 },

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("resource body must be a JSON object")]
    NotAnObject,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("time formatting error: {0}")]
    Time(#[from] time::error::Format),
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;
