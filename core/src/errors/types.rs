//! Token-related error types

use thiserror::Error;

/// Token-related errors
///
/// These errors represent bearer token validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}
