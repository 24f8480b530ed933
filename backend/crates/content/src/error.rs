//! Content Error Types
//!
//! This module provides content-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::http_client::UpstreamError;
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Upstream did not answer within the content timeout
    #[error("Request timeout - please check your connection")]
    Timeout,

    /// Upstream answered with an error status or an unreadable body
    #[error("Failed to load content ({0})")]
    Upstream(String),

    /// Nothing answered
    #[error("No response from server. Please check your connection.")]
    Unavailable,

    /// Email outside every known audience
    #[error("Invalid email domain")]
    InvalidEmailDomain,

    /// Collection name is not a plain slug
    #[error("Unknown collection: {0}")]
    InvalidCollection(String),

    /// Malformed request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ContentError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ContentError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ContentError::InvalidEmailDomain | ContentError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ContentError::InvalidCollection(_) => StatusCode::NOT_FOUND,
            ContentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Timeout => ErrorKind::GatewayTimeout,
            ContentError::Upstream(_) => ErrorKind::BadGateway,
            ContentError::Unavailable => ErrorKind::ServiceUnavailable,
            ContentError::InvalidEmailDomain | ContentError::InvalidInput(_) => {
                ErrorKind::BadRequest
            }
            ContentError::InvalidCollection(_) => ErrorKind::NotFound,
            ContentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether trying again may help
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContentError::Timeout | ContentError::Upstream(_) | ContentError::Unavailable
        )
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            ContentError::Timeout | ContentError::Unavailable | ContentError::Upstream(_) => {
                tracing::warn!(error = %self, "Content upstream failure");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        let app = AppError::new(err.kind(), err.to_string());
        if err.is_retryable() {
            app.with_action("Retry")
        } else {
            app
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<UpstreamError> for ContentError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => ContentError::Timeout,
            UpstreamError::NoResponse(_) => ContentError::Unavailable,
            UpstreamError::Status(code) => ContentError::Upstream(format!("HTTP {}", code)),
            UpstreamError::Decode(msg) => ContentError::Upstream(msg),
            UpstreamError::Request(msg) => ContentError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(matches!(
            ContentError::from(UpstreamError::Timeout),
            ContentError::Timeout
        ));
        assert_eq!(
            ContentError::from(UpstreamError::Status(500)).to_string(),
            "Failed to load content (HTTP 500)"
        );
        assert_eq!(
            ContentError::from(UpstreamError::NoResponse("refused".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_timeout_message_and_action() {
        let app = AppError::from(ContentError::Timeout);
        assert_eq!(app.message(), "Request timeout - please check your connection");
        assert_eq!(app.action(), Some("Retry"));
        assert_eq!(app.status_code(), 504);
    }

    #[test]
    fn test_client_errors_have_no_retry() {
        let app = AppError::from(ContentError::InvalidEmailDomain);
        assert_eq!(app.status_code(), 400);
        assert!(app.action().is_none());
    }
}
