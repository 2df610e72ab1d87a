use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::domain::errors::DomainError;
use crate::infrastructure::http::envelope::{Envelope, FieldError, FieldLocation};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid or missing API key";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: You do not have permission to perform this action";
pub const VALIDATION_MESSAGE: &str = "Validation errors";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const REDACTED_ERROR: &str = "Something went wrong";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(Vec<FieldError>),
    Unauthorized,
    Forbidden,
    /// A controller operation failed; `detail` is reported to the client as-is.
    Operation { message: String, detail: String },
    /// Anything nobody handled. Logged with request context and redacted by
    /// the general error handler.
    Unexpected(String),
}

/// Carried on the response of an [`ApiError::Unexpected`] so the general
/// error handler can log it and decide how much to reveal.
#[derive(Debug, Clone)]
pub struct UnexpectedError(pub String);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(errors) => write!(f, "Validation failed on {} field(s)", errors.len()),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Forbidden => write!(f, "Forbidden"),
            ApiError::Operation { message, detail } => write!(f, "{}: {}", message, detail),
            ApiError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(Envelope::failure(msg))).into_response()
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(Envelope::failure(VALIDATION_MESSAGE).with_errors(errors)),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(Envelope::failure(UNAUTHORIZED_MESSAGE)),
            )
                .into_response(),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(Envelope::failure(FORBIDDEN_MESSAGE)),
            )
                .into_response(),
            ApiError::Operation { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Envelope::failure(message).with_error(detail)),
            )
                .into_response(),
            ApiError::Unexpected(msg) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::failure(INTERNAL_MESSAGE).with_error(REDACTED_ERROR)),
                )
                    .into_response();
                response.extensions_mut().insert(UnexpectedError(msg));
                response
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::ValidationError(msg) => {
                ApiError::Validation(vec![FieldError::new("body", FieldLocation::Body, msg)])
            }
            DomainError::Unauthorized(_) => ApiError::Unauthorized,
            DomainError::Forbidden(_) => ApiError::Forbidden,
            DomainError::Internal(msg) => ApiError::Unexpected(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
