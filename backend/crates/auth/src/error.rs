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
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Email already registered
    #[error("User already exists")]
    EmailTaken,

    /// Invalid credentials (unknown user or wrong password, intentionally
    /// collapsed so the response does not leak which part failed)
    #[error("Invalid credentials or user does not exist")]
    InvalidCredentials,

    /// Account exists but the email has not been verified
    #[error("Email not verified")]
    EmailNotVerified,

    /// Submitted verification code does not match or has expired
    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    /// Session token missing, malformed, tampered or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Request body failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Outbound mail failure
    #[error("Mail error: {0}")]
    Mail(#[from] platform::mailer::MailError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::EmailNotVerified => StatusCode::FORBIDDEN,
            AuthError::InvalidOrExpiredCode => StatusCode::BAD_REQUEST,
            AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Mail(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::EmailNotVerified => ErrorKind::Forbidden,
            AuthError::InvalidOrExpiredCode | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Mail(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::EmailNotVerified => {
                err.with_action("Please verify your email, check your inbox")
            }
            AuthError::InvalidCredentials => err.with_action("Please create an account"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Mail(e) => {
                tracing::error!(error = %e, "Verification mail failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOrExpiredCode => {
                tracing::warn!("Rejected verification code");
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
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::EmailNotVerified.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::InvalidOrExpiredCode.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_unverified_error_carries_action() {
        let app_err = AuthError::EmailNotVerified.to_app_error();
        assert_eq!(app_err.status_code(), 403);
        assert!(app_err.action().unwrap().contains("verify"));
    }

    #[test]
    fn test_credentials_error_is_generic() {
        // The message must not distinguish unknown user from wrong password
        let msg = AuthError::InvalidCredentials.to_string();
        assert!(!msg.to_lowercase().contains("password"));
    }
}
