//! Register Use Case
//!
//! Creates an unverified account and sends the first verification code.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::send_verification::verification_email;
use crate::domain::entity::{User, VerificationToken};
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};
use platform::mailer::Mailer;
use platform::password::ClearTextPassword;

/// Attempts to find a free derived username before giving up
const USERNAME_DERIVE_ATTEMPTS: usize = 3;

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    /// Optional display name; falls back to the derived username
    pub name: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// Register use case
pub struct RegisterUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    token_repo: Arc<V>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, V, M> RegisterUseCase<U, V, M>
where
    U: UserRepository,
    V: VerificationTokenRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<V>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let hashed = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let now = Utc::now();
        let mut user = User::register(email.clone(), hashed, input.name, now);

        // The random suffix makes collisions rare; retry a few times anyway
        for attempt in 0.. {
            if !self.user_repo.exists_by_username(&user.username).await? {
                break;
            }
            if attempt + 1 >= USERNAME_DERIVE_ATTEMPTS {
                return Err(AuthError::Internal(
                    "Could not derive a free username".to_string(),
                ));
            }
            user.username = Username::derive_from_email(&email);
        }

        self.user_repo.create(&user).await?;

        // First verification code goes out as part of registration
        let token = VerificationToken::issue(email.clone(), now);
        self.token_repo.upsert(&token).await?;

        let (subject, html) = verification_email(&token.code);
        self.mailer.send(email.as_str(), &subject, &html).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User registered, verification code sent"
        );

        Ok(RegisterOutput {
            user_id: user.id.to_string(),
            username: user.username.original().to_string(),
            email: email.as_str().to_string(),
            display_name: user.display_name,
            avatar_url: user.avatar_url,
        })
    }
}
