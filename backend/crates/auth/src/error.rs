//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Google credential could not be decoded or was rejected
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// No identity and no admin token in the tab
    #[error("{0}")]
    SessionRequired(String),

    /// Identity present but outside the allowed domains
    #[error("{0}")]
    AccessDenied(String),

    /// Admin token missing or rejected upstream
    #[error("Admin session is missing or no longer valid")]
    AdminTokenInvalid,

    /// Admin login blocked by the attempt lockout
    #[error("{0}")]
    AccountLocked(String),

    /// Upstream rejected the admin credentials
    #[error("{0}")]
    InvalidCredentials(String),

    /// Upstream throttled the admin login
    #[error("{0}")]
    RateLimited(String),

    /// Upstream failed or could not be reached
    #[error("{0}")]
    Upstream(String),

    /// Malformed request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredential(_) | AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::SessionRequired(_)
            | AuthError::AdminTokenInvalid
            | AuthError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AuthError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AuthError::AccountLocked(_) => StatusCode::LOCKED,
            AuthError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AuthError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredential(_) | AuthError::InvalidInput(_) => ErrorKind::BadRequest,
            AuthError::SessionRequired(_)
            | AuthError::AdminTokenInvalid
            | AuthError::InvalidCredentials(_) => ErrorKind::Unauthorized,
            AuthError::AccessDenied(_) => ErrorKind::Forbidden,
            AuthError::AccountLocked(_) => ErrorKind::Locked,
            AuthError::RateLimited(_) => ErrorKind::TooManyRequests,
            AuthError::Upstream(_) => ErrorKind::BadGateway,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::SessionRequired(_) | AuthError::AccessDenied(_) => {
                err.with_action("Sign in with an MFU Google account")
            }
            AuthError::AdminTokenInvalid => err.with_action("Sign in at /admin-login"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Upstream(msg) => {
                tracing::error!(message = %msg, "Identity provider failure");
            }
            AuthError::InvalidCredentials(_) => {
                tracing::warn!("Invalid admin login attempt");
            }
            AuthError::AccountLocked(_) => {
                tracing::warn!("Admin login attempt while locked");
            }
            AuthError::AccessDenied(_) => {
                tracing::warn!("Access with a non-university identity");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::InvalidInput(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
