//! Username Value Object
//!
//! ユーザー名は、ユーザーを識別するための**公開識別子（ハンドル）**。
//! サインイン、画面表示、検索に使用される。
//!
//! ## 設計方針
//! - ASCII文字のみ許可（a-z, 0-9, _ . -）
//! - 大文字入力は受け付けるが、canonical（正規形）は小文字
//! - NFKC正規化 → 検証 → 小文字化 の順で処理
//! - 登録時はメールアドレスのローカル部 + ランダム6文字から自動生成
//!
//! ## 不変条件
//! - 長さ: 3〜30文字（正規化後）
//! - `@` を含まない（サインイン識別子がメールと曖昧にならないように）
//! - 英数字を最低1文字含む

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::domain::value_object::email::Email;
use kernel::error::app_error::{AppError, AppResult};

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 30;

/// Length of the random suffix appended at registration
const DERIVED_SUFFIX_LENGTH: usize = 6;

/// Allowed special characters in a username
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Username value object
///
/// Keeps the original casing for display and a lowercase canonical form
/// for uniqueness checks and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    /// Create a new username with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        // NFKC normalization before any checks
        let original: String = raw.into().trim().nfkc().collect();

        let char_count = original.chars().count();
        if char_count < USERNAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at least {USERNAME_MIN_LENGTH} characters"
            )));
        }
        if char_count > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {USERNAME_MAX_LENGTH} characters"
            )));
        }

        let valid_chars = original
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c));
        if !valid_chars {
            return Err(AppError::bad_request(
                "Username may only contain letters, digits, '_', '.' and '-'",
            ));
        }

        if !original.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::bad_request(
                "Username must contain at least one letter or digit",
            ));
        }

        let canonical = original.to_lowercase();

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Derive a username from an email's local part plus a random suffix
    ///
    /// Mirrors registration: `reader@example.com` becomes something like
    /// `readerk3x9mq`. Disallowed characters in the local part are dropped;
    /// the random suffix guarantees the minimum length.
    pub fn derive_from_email(email: &Email) -> Self {
        let mut base: String = email
            .local_part()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(c))
            .collect();

        // Leave room for the suffix within the maximum length
        base.truncate(USERNAME_MAX_LENGTH - DERIVED_SUFFIX_LENGTH);

        let mut rng = rand::thread_rng();
        let suffix: String = (0..DERIVED_SUFFIX_LENGTH)
            .map(|_| {
                let chars = b"abcdefghijklmnopqrstuvwxyz0123456789";
                chars[rng.gen_range(0..chars.len())] as char
            })
            .collect();

        let original = format!("{base}{suffix}");
        let canonical = original.to_lowercase();

        Self {
            original,
            canonical,
        }
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// Original (display) form
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical (lowercase) form used for lookups
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(Username::new("booklover").is_ok());
        assert!(Username::new("top.author-42").is_ok());
        assert!(Username::new("abc").is_ok());
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(Username::new("ab").is_err()); // too short
        assert!(Username::new("x".repeat(31)).is_err()); // too long
        assert!(Username::new("has space").is_err());
        assert!(Username::new("user@name").is_err()); // '@' is ambiguous with email
        assert!(Username::new("...").is_err()); // no alphanumeric
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = Username::new("BookLover").unwrap();
        assert_eq!(name.original(), "BookLover");
        assert_eq!(name.canonical(), "booklover");
    }

    #[test]
    fn test_derive_from_email() {
        let email = Email::new("reader@example.com").unwrap();
        let name = Username::derive_from_email(&email);

        assert!(name.original().starts_with("reader"));
        assert_eq!(name.original().chars().count(), "reader".len() + 6);
        // Derived names always pass their own validation
        assert!(Username::new(name.original()).is_ok());
    }

    #[test]
    fn test_derive_from_email_strips_plus_tag_chars() {
        let email = Email::new("user+tag@example.com").unwrap();
        let name = Username::derive_from_email(&email);
        assert!(!name.original().contains('+'));
    }

    #[test]
    fn test_derived_names_differ() {
        let email = Email::new("reader@example.com").unwrap();
        let a = Username::derive_from_email(&email);
        let b = Username::derive_from_email(&email);
        // Random suffix makes collisions vanishingly unlikely
        assert_ne!(a.original(), b.original());
    }
}
