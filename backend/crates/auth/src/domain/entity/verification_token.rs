//! Verification Token Entity
//!
//! メール検証用のワンタイムコードを保持する。
//!
//! ## 不変条件
//! - 1メールアドレスにつき有効なコードは常に1つ（再発行で上書き）
//! - 有効期限は発行から15分
//! - 検証成功時にレコードは削除される（使い捨て）

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{Email, OtpCode};

/// Code lifetime in minutes
pub const CODE_TTL_MINUTES: i64 = 15;

/// A pending email verification code
#[derive(Debug, Clone)]
pub struct VerificationToken {
    /// The email address being verified
    pub identifier: Email,
    pub code: OtpCode,
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Issue a fresh code for an email, valid for 15 minutes
    pub fn issue(identifier: Email, now: DateTime<Utc>) -> Self {
        Self {
            identifier,
            code: OtpCode::generate(),
            expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
        }
    }

    /// Whether the code has expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check a submitted code: must match and must not be expired
    pub fn accepts(&self, input: &str, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && self.code.matches(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_expiry() {
        let now = Utc::now();
        let token = VerificationToken::issue(Email::new("a@example.com").unwrap(), now);
        assert_eq!(token.expires_at, now + Duration::minutes(15));
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::minutes(15)));
    }

    #[test]
    fn test_accepts_valid_code() {
        let now = Utc::now();
        let token = VerificationToken::issue(Email::new("a@example.com").unwrap(), now);
        let code = token.code.as_str().to_string();

        assert!(token.accepts(&code, now));
        assert!(token.accepts(&code, now + Duration::minutes(14)));
    }

    #[test]
    fn test_rejects_expired_or_wrong_code() {
        let now = Utc::now();
        let token = VerificationToken::issue(Email::new("a@example.com").unwrap(), now);
        let code = token.code.as_str().to_string();

        // Expired, even with the right code
        assert!(!token.accepts(&code, now + Duration::minutes(16)));
        // Wrong code
        assert!(!token.accepts("000000", now));
    }
}
