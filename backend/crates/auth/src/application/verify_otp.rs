//! Verify OTP Use Case
//!
//! Checks a submitted verification code against the pending one and
//! marks the account verified. Codes are single-use: success deletes
//! the pending record.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Verify OTP use case
pub struct VerifyOtpUseCase<U, V>
where
    U: UserRepository,
    V: VerificationTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<V>,
}

impl<U, V> VerifyOtpUseCase<U, V>
where
    U: UserRepository,
    V: VerificationTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<V>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, email: String, code: String) -> AuthResult<()> {
        let email = Email::new(email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self
            .token_repo
            .find_by_identifier(&email)
            .await?
            .ok_or(AuthError::InvalidOrExpiredCode)?;

        let now = Utc::now();
        if !token.accepts(&code, now) {
            return Err(AuthError::InvalidOrExpiredCode);
        }

        user.mark_verified(now);
        self.user_repo.mark_verified(&user).await?;
        self.token_repo.delete_by_identifier(&email).await?;

        tracing::info!(user_id = %user.id, "Email verified");

        Ok(())
    }
}
