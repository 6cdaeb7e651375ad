//! Blog Error Types
//!
//! This module provides blog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Post not found
    #[error("Blog post not found")]
    PostNotFound,

    /// No valid session on a protected route
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller is not the post's author (and not an admin)
    #[error("You are not the author of this post")]
    NotAuthor,

    /// Request failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BlogError::PostNotFound => StatusCode::NOT_FOUND,
            BlogError::Unauthenticated => StatusCode::UNAUTHORIZED,
            BlogError::NotAuthor => StatusCode::FORBIDDEN,
            BlogError::Validation(_) => StatusCode::BAD_REQUEST,
            BlogError::Database(_) | BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound => ErrorKind::NotFound,
            BlogError::Unauthenticated => ErrorKind::Unauthorized,
            BlogError::NotAuthor => ErrorKind::Forbidden,
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::NotAuthor => {
                tracing::warn!("Rejected non-author mutation");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => BlogError::Validation(err.to_string()),
            _ => BlogError::Internal(err.to_string()),
        }
    }
}

impl From<auth::AuthError> for BlogError {
    fn from(err: auth::AuthError) -> Self {
        match err {
            auth::AuthError::SessionInvalid => BlogError::Unauthenticated,
            other => BlogError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(BlogError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BlogError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(BlogError::NotAuthor.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            BlogError::Validation("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
