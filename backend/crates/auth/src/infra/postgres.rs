//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{user::User, verification_token::VerificationToken};
use crate::domain::repository::{UserRepository, VerificationTokenRepository};
use crate::domain::value_object::{Email, OtpCode, UserRole, Username};
use crate::error::{AuthError, AuthResult};
use kernel::id::UserId;
use platform::password::HashedPassword;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired verification codes
    pub async fn cleanup_expired_codes(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM verification_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(codes_deleted = deleted, "Cleaned up expired verification codes");

        Ok(deleted)
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    username,
    username_canonical,
    email,
    password_hash,
    display_name,
    user_role,
    avatar_url,
    email_verified_at,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                username,
                username_canonical,
                email,
                password_hash,
                display_name,
                user_role,
                avatar_url,
                email_verified_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.username.original())
        .bind(user.username.canonical())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(&user.display_name)
        .bind(user.role.id())
        .bind(&user.avatar_url)
        .bind(user.email_verified_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Option<User>> {
        // Usernames cannot contain '@', so a single OR lookup is unambiguous
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username_canonical = $1 OR email = $1"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username_canonical = $1)",
        )
        .bind(username.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn mark_verified(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email_verified_at = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email_verified_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Verification Token Repository Implementation
// ============================================================================

impl VerificationTokenRepository for PgAuthRepository {
    async fn upsert(&self, token: &VerificationToken) -> AuthResult<()> {
        // One active code per email: re-issue replaces code and expiry
        sqlx::query(
            r#"
            INSERT INTO verification_tokens (identifier, code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (identifier)
            DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(token.identifier.as_str())
        .bind(token.code.as_str())
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_identifier(&self, identifier: &Email) -> AuthResult<Option<VerificationToken>> {
        let row = sqlx::query_as::<_, VerificationTokenRow>(
            r#"
            SELECT identifier, code, expires_at
            FROM verification_tokens
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_token()))
    }

    async fn delete_by_identifier(&self, identifier: &Email) -> AuthResult<()> {
        sqlx::query("DELETE FROM verification_tokens WHERE identifier = $1")
            .bind(identifier.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    #[allow(dead_code)]
    username_canonical: String,
    email: String,
    password_hash: String,
    display_name: String,
    user_role: i16,
    avatar_url: String,
    email_verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {e}")))?;

        let role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        Ok(User {
            id: UserId::from_uuid(self.user_id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password,
            display_name: self.display_name,
            role,
            avatar_url: self.avatar_url,
            email_verified_at: self.email_verified_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct VerificationTokenRow {
    identifier: String,
    code: String,
    expires_at: DateTime<Utc>,
}

impl VerificationTokenRow {
    fn into_token(self) -> VerificationToken {
        VerificationToken {
            identifier: Email::from_db(self.identifier),
            code: OtpCode::from_db(self.code),
            expires_at: self.expires_at,
        }
    }
}
