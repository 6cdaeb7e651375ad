//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{user::User, verification_token::VerificationToken};
use crate::domain::value_object::{Email, Username};
use crate::error::AuthResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by username or email, in a single lookup
    ///
    /// Sign-in accepts either; usernames cannot contain `@` so the two
    /// namespaces never collide.
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if username is taken
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// Persist the verified-at timestamp
    async fn mark_verified(&self, user: &User) -> AuthResult<()>;
}

/// Verification token repository trait
#[trait_variant::make(VerificationTokenRepository: Send)]
pub trait LocalVerificationTokenRepository {
    /// Insert or replace the pending code for an email
    ///
    /// At most one active code per email: re-issuing overwrites the
    /// previous code and expiry.
    async fn upsert(&self, token: &VerificationToken) -> AuthResult<()>;

    /// Find the pending code for an email
    async fn find_by_identifier(&self, identifier: &Email) -> AuthResult<Option<VerificationToken>>;

    /// Delete the pending code for an email (after successful verification)
    async fn delete_by_identifier(&self, identifier: &Email) -> AuthResult<()>;
}
