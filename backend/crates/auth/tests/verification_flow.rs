//! End-to-end account lifecycle over in-memory fakes:
//! register, verify by code, then sign in.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use auth::application::{
    AuthConfig, CheckEmailUseCase, RegisterInput, RegisterUseCase, SendVerificationUseCase,
    SessionClaims, SignInInput, SignInUseCase, VerifyOtpUseCase,
};
use auth::domain::entity::{User, VerificationToken};
use auth::domain::repository::{UserRepository, VerificationTokenRepository};
use auth::domain::value_object::{Email, Username};
use auth::error::{AuthError, AuthResult};
use kernel::id::UserId;
use platform::mailer::Mailer;

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryRepo {
    users: Arc<Mutex<Vec<User>>>,
    tokens: Arc<Mutex<HashMap<String, VerificationToken>>>,
}

impl InMemoryRepo {
    /// Peek at the pending code for an email (what the mail would carry)
    fn pending_code(&self, email: &str) -> Option<String> {
        self.tokens
            .lock()
            .unwrap()
            .get(email)
            .map(|t| t.code.as_str().to_string())
    }

    /// Force-expire the pending code for an email
    fn expire_code(&self, email: &str) {
        if let Some(token) = self.tokens.lock().unwrap().get_mut(email) {
            token.expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

impl UserRepository for InMemoryRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email.as_str())
            .cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.canonical() == identifier || u.email.as_str() == identifier)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username.canonical() == username.canonical()))
    }

    async fn mark_verified(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AuthError::UserNotFound)?;
        stored.email_verified_at = user.email_verified_at;
        stored.updated_at = user.updated_at;
        Ok(())
    }
}

impl VerificationTokenRepository for InMemoryRepo {
    async fn upsert(&self, token: &VerificationToken) -> AuthResult<()> {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.identifier.as_str().to_string(), token.clone());
        Ok(())
    }

    async fn find_by_identifier(
        &self,
        identifier: &Email,
    ) -> AuthResult<Option<VerificationToken>> {
        Ok(self.tokens.lock().unwrap().get(identifier.as_str()).cloned())
    }

    async fn delete_by_identifier(&self, identifier: &Email) -> AuthResult<()> {
        self.tokens.lock().unwrap().remove(identifier.as_str());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CapturingMailer {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Mailer for CapturingMailer {
    async fn send(&self, to: &str, _subject: &str, html: &str) -> Result<(), platform::mailer::MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), html.to_string()));
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    repo: Arc<InMemoryRepo>,
    mailer: Arc<CapturingMailer>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryRepo::default()),
            mailer: Arc::new(CapturingMailer::default()),
            config: Arc::new(AuthConfig::development()),
        }
    }

    async fn register(&self, email: &str, password: &str) -> AuthResult<()> {
        RegisterUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
        .execute(RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            name: None,
        })
        .await
        .map(|_| ())
    }

    async fn check_email(&self, email: &str) -> AuthResult<()> {
        CheckEmailUseCase::new(self.repo.clone())
            .execute(email.to_string())
            .await
            .map(|_| ())
    }

    async fn send_verification(&self, email: &str) -> AuthResult<()> {
        SendVerificationUseCase::new(self.repo.clone(), self.repo.clone(), self.mailer.clone())
            .execute(email.to_string())
            .await
    }

    async fn verify(&self, email: &str, code: &str) -> AuthResult<()> {
        VerifyOtpUseCase::new(self.repo.clone(), self.repo.clone())
            .execute(email.to_string(), code.to_string())
            .await
    }

    async fn sign_in(&self, identifier: &str, password: &str) -> AuthResult<String> {
        SignInUseCase::new(self.repo.clone(), self.config.clone())
            .execute(SignInInput {
                identifier: identifier.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|out| out.session_token)
    }
}

const EMAIL: &str = "reader@example.com";
const PASSWORD: &str = "correct horse battery";

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn full_lifecycle_register_verify_sign_in() {
    let h = Harness::new();

    h.register(EMAIL, PASSWORD).await.unwrap();

    // Registration sent a code by mail
    assert_eq!(h.mailer.sent.lock().unwrap().len(), 1);
    let code = h.repo.pending_code(EMAIL).unwrap();
    {
        let sent = h.mailer.sent.lock().unwrap();
        assert_eq!(sent[0].0, EMAIL);
        assert!(sent[0].1.contains(&code));
    }

    // Unverified account is reported as such
    assert!(matches!(
        h.check_email(EMAIL).await,
        Err(AuthError::EmailNotVerified)
    ));

    // Unverified sign-in is rejected with the distinct error
    assert!(matches!(
        h.sign_in(EMAIL, PASSWORD).await,
        Err(AuthError::EmailNotVerified)
    ));

    // Wrong code is rejected, right code verifies
    assert!(matches!(
        h.verify(EMAIL, "000000").await,
        Err(AuthError::InvalidOrExpiredCode)
    ));
    h.verify(EMAIL, &code).await.unwrap();

    // Codes are single-use
    assert!(h.repo.pending_code(EMAIL).is_none());
    assert!(matches!(
        h.verify(EMAIL, &code).await,
        Err(AuthError::InvalidOrExpiredCode)
    ));

    // Now the account checks out and can sign in
    h.check_email(EMAIL).await.unwrap();
    let token = h.sign_in(EMAIL, PASSWORD).await.unwrap();

    let claims = SessionClaims::verify(&token, &h.config.session_secret, Utc::now()).unwrap();
    assert_eq!(claims.role.code(), "READER");
    assert!(claims.username.starts_with("reader"));
}

#[tokio::test]
async fn sign_in_accepts_username_or_email() {
    let h = Harness::new();
    h.register(EMAIL, PASSWORD).await.unwrap();
    let code = h.repo.pending_code(EMAIL).unwrap();
    h.verify(EMAIL, &code).await.unwrap();

    let username = {
        let users = h.repo.users.lock().unwrap();
        users[0].username.canonical().to_string()
    };

    h.sign_in(EMAIL, PASSWORD).await.unwrap();
    h.sign_in(&username, PASSWORD).await.unwrap();
}

#[tokio::test]
async fn reissue_replaces_previous_code() {
    let h = Harness::new();
    h.register(EMAIL, PASSWORD).await.unwrap();
    let first = h.repo.pending_code(EMAIL).unwrap();

    h.send_verification(EMAIL).await.unwrap();
    let second = h.repo.pending_code(EMAIL).unwrap();
    assert_ne!(first, second);

    // Only the newest code is accepted
    assert!(matches!(
        h.verify(EMAIL, &first).await,
        Err(AuthError::InvalidOrExpiredCode)
    ));
    h.verify(EMAIL, &second).await.unwrap();
}

#[tokio::test]
async fn expired_code_is_rejected() {
    let h = Harness::new();
    h.register(EMAIL, PASSWORD).await.unwrap();
    let code = h.repo.pending_code(EMAIL).unwrap();

    h.repo.expire_code(EMAIL);

    assert!(matches!(
        h.verify(EMAIL, &code).await,
        Err(AuthError::InvalidOrExpiredCode)
    ));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let h = Harness::new();
    h.register(EMAIL, PASSWORD).await.unwrap();

    assert!(matches!(
        h.register(EMAIL, "another password").await,
        Err(AuthError::EmailTaken)
    ));
}

#[tokio::test]
async fn credential_failures_are_indistinguishable() {
    let h = Harness::new();
    h.register(EMAIL, PASSWORD).await.unwrap();
    let code = h.repo.pending_code(EMAIL).unwrap();
    h.verify(EMAIL, &code).await.unwrap();

    // Unknown user and wrong password map to the same error
    let unknown = h.sign_in("ghost@example.com", PASSWORD).await.unwrap_err();
    let wrong = h.sign_in(EMAIL, "wrong password here").await.unwrap_err();
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn send_verification_for_unknown_or_verified_account() {
    let h = Harness::new();

    assert!(matches!(
        h.send_verification(EMAIL).await,
        Err(AuthError::UserNotFound)
    ));

    h.register(EMAIL, PASSWORD).await.unwrap();
    let code = h.repo.pending_code(EMAIL).unwrap();
    h.verify(EMAIL, &code).await.unwrap();

    assert!(matches!(
        h.send_verification(EMAIL).await,
        Err(AuthError::Validation(_))
    ));
}
