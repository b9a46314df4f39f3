//! Conversion of domain failures into `{status: false, message}` responses.

use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use rh_core::errors::{DomainError, TokenError};
use rh_shared::errors::{error_codes, ErrorResponse};

pub const TOKEN_NOT_FOUND: &str = "Token not found";
pub const INVALID_TOKEN: &str = "Invalid token";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No bearer token on a protected route
    #[error("{}", TOKEN_NOT_FOUND)]
    MissingToken,

    /// Malformed request that never reached the engine
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Client-facing message; internal detail never leaves the server
    pub fn message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Token(_)) => INVALID_TOKEN.to_string(),
            ApiError::Domain(DomainError::Internal { .. }) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::MissingToken => error_codes::UNAUTHORIZED,
            ApiError::BadRequest(_) => error_codes::INVALID_REQUEST,
            ApiError::Domain(error) => match error {
                DomainError::Unauthorized => error_codes::UNAUTHORIZED,
                DomainError::InvalidRequest { .. } => error_codes::INVALID_REQUEST,
                DomainError::NotFound { .. } => error_codes::NOT_FOUND,
                DomainError::Forbidden { .. } => error_codes::FORBIDDEN,
                DomainError::Conflict { .. } => error_codes::BOOKING_CONFLICT,
                DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
                DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
                DomainError::Token(_) => error_codes::TOKEN_INVALID,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(error) => match error {
                DomainError::Unauthorized | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
                // Conflicts keep the 400 clients already handle
                DomainError::InvalidRequest { .. } | DomainError::Conflict { .. } => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Domain(DomainError::Internal { message }) = self {
            log::error!("Internal error: {}", message);
        }

        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.message()).with_code(self.code()))
    }
}

/// Replaces actix's plain-text body errors with the JSON envelope
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    ApiError::bad_request(format!("Invalid request body: {}", err)).into()
}

/// Same for path segments that fail to deserialize
pub fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(format!("Invalid path: {}", err)).into()
}
