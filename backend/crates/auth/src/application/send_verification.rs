//! Send Verification Use Case
//!
//! (Re-)issues the email verification code. At most one code is active
//! per email: issuing a new one replaces the previous one.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::VerificationToken;
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};
use platform::mailer::Mailer;

/// Send verification use case
pub struct SendVerificationUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    token_repo: Arc<V>,
    mailer: Arc<M>,
}

impl<U, V, M> SendVerificationUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<V>, mailer: Arc<M>) -> Self {
        Self {
            user_repo,
            token_repo,
            mailer,
        }
    }

    pub async fn execute(&self, email: String) -> AuthResult<()> {
        let email = Email::new(email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_verified() {
            return Err(AuthError::Validation(
                "Email is already verified".to_string(),
            ));
        }

        let token = VerificationToken::issue(email.clone(), Utc::now());
        self.token_repo.upsert(&token).await?;

        let (subject, html) = verification_email(&token.code);
        self.mailer.send(email.as_str(), &subject, &html).await?;

        tracing::info!(user_id = %user.id, "Verification code issued");

        Ok(())
    }
}

/// Build the verification email subject and HTML body
pub(crate) fn verification_email(code: &OtpCode) -> (String, String) {
    let subject = "Verify your email address".to_string();
    let html = format!(
        "<div style=\"font-family: sans-serif; max-width: 480px; margin: 0 auto;\">\
         <h2>Verify your email</h2>\
         <p>Enter this code to verify your email address:</p>\
         <p style=\"font-size: 28px; letter-spacing: 6px; font-weight: bold;\">{code}</p>\
         <p>The code expires in 15 minutes. If you did not request this, you can ignore this email.</p>\
         </div>"
    );
    (subject, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_body_contains_code() {
        let code = OtpCode::from_db("3fa2b1");
        let (subject, html) = verification_email(&code);
        assert!(subject.contains("Verify"));
        assert!(html.contains("3fa2b1"));
        assert!(html.contains("15 minutes"));
    }
}
