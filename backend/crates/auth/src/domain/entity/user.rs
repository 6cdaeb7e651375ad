//! User Entity
//!
//! ユーザー集約のルート。登録・検証・サインインの対象。
//!
//! ## ライフサイクル
//! 1. `register` で作成（未検証状態、`email_verified_at = None`）
//! 2. OTP検証に成功すると `mark_verified` で検証済みになる
//! 3. 検証済みユーザーのみサインイン可能

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, UserRole, Username};

/// Default avatar provider. Seeded with the email local part so the
/// image is stable across re-registration attempts.
const AVATAR_URL_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password: HashedPassword,
    pub display_name: String,
    pub role: UserRole,
    pub avatar_url: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new unverified user at registration
    ///
    /// The username is derived from the email local part and the avatar
    /// URL is generated from the same seed. The display name falls back
    /// to the derived username when none is given.
    pub fn register(
        email: Email,
        password: HashedPassword,
        display_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let username = Username::derive_from_email(&email);
        let avatar_url = Self::avatar_url_for(&email);
        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| username.original().to_string());

        Self {
            id: UserId::new(),
            username,
            email,
            password,
            display_name,
            role: UserRole::default(),
            avatar_url,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the default avatar URL for an email
    pub fn avatar_url_for(email: &Email) -> String {
        format!("{AVATAR_URL_BASE}?seed={}", email.local_part())
    }

    /// Whether the email has been verified
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Mark the email as verified
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.email_verified_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn test_user(name: Option<String>) -> User {
        let email = Email::new("reader@example.com").unwrap();
        let password = ClearTextPassword::new("correct horse battery".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        User::register(email, password, name, Utc::now())
    }

    #[test]
    fn test_register_starts_unverified() {
        let user = test_user(Some("The Reader".to_string()));
        assert!(!user.is_verified());
        assert_eq!(user.role, UserRole::Reader);
        assert_eq!(user.display_name, "The Reader");
        assert!(user.username.original().starts_with("reader"));
        assert!(user.avatar_url.contains("seed=reader"));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = test_user(None);
        assert_eq!(user.display_name, user.username.original());

        let blank = test_user(Some("   ".to_string()));
        assert_eq!(blank.display_name, blank.username.original());
    }

    #[test]
    fn test_mark_verified() {
        let mut user = test_user(None);
        let now = Utc::now();
        user.mark_verified(now);
        assert!(user.is_verified());
        assert_eq!(user.email_verified_at, Some(now));
        assert_eq!(user.updated_at, now);
    }
}
