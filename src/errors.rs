//! Centralized error handling.
//!
//! Every adapter normalizes its backend-specific failures into [`RepoError`],
//! so callers can switch backends without touching their error paths.

use thiserror::Error;

/// Repository error taxonomy shared by all adapters.
#[derive(Error, Debug)]
pub enum RepoError {
    /// No item exists under the requested identifier.
    #[error("item not found")]
    NotFound,

    /// An item with the same identity already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The payload was rejected before or by the backend.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// (De)serialization at the interface boundary failed.
    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),

    /// Database failure that has no more specific mapping.
    #[cfg(feature = "sea-orm")]
    #[error("database error")]
    Database(#[source] sea_orm::DbErr),

    /// Transport-level HTTP failure (connect, timeout, decode).
    #[cfg(feature = "http")]
    #[error("transport error")]
    Transport(#[from] reqwest::Error),

    /// Backend signalled an error the adapter cannot classify further.
    #[error("backend error: {0}")]
    Backend(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RepoError {
    /// Stable machine-readable code for logs and API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            RepoError::NotFound => "NOT_FOUND",
            RepoError::Conflict(_) => "CONFLICT",
            RepoError::InvalidPayload(_) => "INVALID_PAYLOAD",
            RepoError::Serialization(_) => "SERIALIZATION_ERROR",
            #[cfg(feature = "sea-orm")]
            RepoError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "http")]
            RepoError::Transport(_) => "TRANSPORT_ERROR",
            RepoError::Backend(_) => "BACKEND_ERROR",
            RepoError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Convenience constructors
impl RepoError {
    pub fn conflict(what: impl Into<String>) -> Self {
        RepoError::Conflict(what.into())
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        RepoError::InvalidPayload(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        RepoError::Backend(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        RepoError::Internal(msg.into())
    }
}

#[cfg(feature = "sea-orm")]
impl From<sea_orm::DbErr> for RepoError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::SqlErr;

        // Constraint violations carry CRUD meaning; everything else stays
        // a database error.
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::InvalidPayload(msg),
            _ => {
                tracing::error!("Database error: {:?}", err);
                RepoError::Database(err)
            }
        }
    }
}

/// Result type alias
pub type RepoResult<T> = Result<T, RepoError>;

/// Extension trait for Option -> RepoError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> RepoResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> RepoResult<T> {
        self.ok_or(RepoError::NotFound)
    }
}
