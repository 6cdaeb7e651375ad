//! Check Email Use Case
//!
//! Reports whether an email belongs to a verified account. Used by the
//! sign-in form to route unverified users back to the code screen.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Check email output
pub struct CheckEmailOutput {
    pub email: String,
    pub username: String,
    pub verified: bool,
}

/// Check email use case
pub struct CheckEmailUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CheckEmailUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Errors with `UserNotFound` for unknown emails and
    /// `EmailNotVerified` for accounts still pending verification.
    pub async fn execute(&self, email: String) -> AuthResult<CheckEmailOutput> {
        let email = Email::new(email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_verified() {
            return Err(AuthError::EmailNotVerified);
        }

        Ok(CheckEmailOutput {
            email: user.email.as_str().to_string(),
            username: user.username.original().to_string(),
            verified: true,
        })
    }
}
