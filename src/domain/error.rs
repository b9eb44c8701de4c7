//! Domain and service error types

use thiserror::Error;

/// A single `(code, description)` pair reported by the account service.
///
/// The order of entries within a rejection is meaningful and preserved
/// all the way to the rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: String,
    pub description: String,
}

impl ErrorEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Repository-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for repository operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors returned by [`AccountService`](crate::domain::AccountService)
/// operations.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The operation was understood but refused. Carries the ordered
    /// `(code, description)` pairs describing why.
    #[error("Account operation rejected")]
    Rejected(Vec<ErrorEntry>),

    /// The service could not complete the call at all (storage down,
    /// crypto failure). Never shown to the user as a validation message.
    #[error("Account service unavailable: {0}")]
    Unavailable(String),
}

/// Result type for account service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fatal dispatcher errors.
///
/// Both variants propagate to the surrounding infrastructure (error page,
/// logging, alerting) instead of being rendered as form errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// An authenticated context without a usable account id. Sessions are
    /// issued with a numeric subject, so this is a configuration defect.
    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Account service unavailable: {0}")]
    ServiceUnavailable(String),
}
