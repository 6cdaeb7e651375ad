//! Sign In Use Case
//!
//! Authenticates by username or email plus password and issues a
//! signed session token.
//!
//! Unknown identifier and wrong password both map to the same generic
//! `InvalidCredentials` error; only the unverified-email case gets a
//! distinct response so the client can resume the verification flow.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionClaims;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use platform::password::ClearTextPassword;

/// Sign in input
pub struct SignInInput {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed session token for the cookie / Authorization header
    pub session_token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub avatar_url: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let identifier = input.identifier.trim().to_lowercase();
        if identifier.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .user_repo
            .find_by_identifier(&identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        // Verify the password BEFORE revealing verification state, so an
        // attacker cannot probe which emails have unverified accounts.
        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_verified() {
            return Err(AuthError::EmailNotVerified);
        }

        let expires_at = Utc::now() + Duration::seconds(self.config.session_ttl_secs());
        let claims = SessionClaims::new(
            user.id.into_uuid(),
            user.username.original().to_string(),
            user.role,
            expires_at,
        );
        let session_token = claims.sign(&self.config.session_secret)?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            session_token,
            user_id: user.id.to_string(),
            username: user.username.original().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
            avatar_url: user.avatar_url,
        })
    }
}
