//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
///
/// The API layer maps each variant onto one HTTP status; the `Display`
/// text of the client-facing variants is what callers see as `message`.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or invalid caller identity
    #[error("Unauthorized")]
    Unauthorized,

    /// Required fields missing or malformed
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Referenced item or booking does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Caller lacks the required relationship to the resource
    #[error("{message}")]
    Forbidden { message: String },

    /// Date range collides with a confirmed booking, or the booking left its active states
    #[error("{message}")]
    Conflict { message: String },

    /// Storage or other unexpected failure
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        DomainError::InvalidRequest { message: message.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound { resource: resource.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal { message: message.into() }
    }

    /// True for failures the caller did not cause
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Internal { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
