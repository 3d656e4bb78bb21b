//! HTTP-facing error taxonomy.
//!
//! Every failure a handler can produce maps to one status code and one stable
//! machine-readable `error` string. Store failures other than the expected
//! domain outcomes are logged here and surfaced as `500` without details.

use super::types::ErrorResponse;
use crate::{portal::auth::AuthError, store::StoreError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Request field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Title,
    Summary,
    Rating,
}

impl Field {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Name => "invalid_name",
            Self::Email => "invalid_email",
            Self::Title => "invalid_title",
            Self::Summary => "invalid_summary",
            Self::Rating => "invalid_rating",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Name => "Name is required and must be at most 100 characters",
            Self::Email => "Invalid email",
            Self::Title => "Title is required and must be at most 200 characters",
            Self::Summary => "Summary is required and must be at most 1000 characters",
            Self::Rating => "Rating must be between 1 and 10",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Only POST method is allowed")]
    MethodNotAllowed,
    #[error("Invalid JSON in request body")]
    InvalidJson,
    #[error("{}", .0.message())]
    InvalidField(Field),
    #[error("{0}")]
    AuthenticationFailed(AuthError),
    #[error("{0}")]
    AccessDenied(&'static str),
    #[error("Complaint not found")]
    ComplaintNotFound,
    #[error("Email already exists")]
    EmailExists,
    #[error("Complaint is already resolved")]
    AlreadyResolved,
    #[error("Internal server error")]
    Internal(StoreError),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidJson | Self::InvalidField(_) | Self::AlreadyResolved => {
                StatusCode::BAD_REQUEST
            }
            Self::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::ComplaintNotFound => StatusCode::NOT_FOUND,
            Self::EmailExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::InvalidJson => "invalid_json",
            Self::InvalidField(field) => field.code(),
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::AccessDenied(_) => "access_denied",
            Self::ComplaintNotFound => "complaint_not_found",
            Self::EmailExists => "email_exists",
            Self::AlreadyResolved => "already_resolved",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::EmailExists,
            StoreError::ComplaintNotFound => Self::ComplaintNotFound,
            StoreError::AlreadyResolved => Self::AlreadyResolved,
            other => Self::Internal(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(store) => Self::from(store),
            other => Self::AuthenticationFailed(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!("Store failure: {err}");
        }

        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
