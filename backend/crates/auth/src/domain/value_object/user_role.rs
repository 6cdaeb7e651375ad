//! User Role Value Object
//!
//! ユーザーの権限区分。
//!
//! - `Reader` (0): 閲覧のみ。登録直後のデフォルト
//! - `Author` (1): ブログ投稿の作成・編集・削除が可能
//! - `Admin` (2): 全ユーザーの投稿を管理可能

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    Reader = 0,
    Author = 1,
    Admin = 2,
}

impl UserRole {
    /// Numeric id stored in the database
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// String code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Reader => "READER",
            UserRole::Author => "AUTHOR",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Restore from a database id
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::Reader),
            1 => Some(UserRole::Author),
            2 => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Restore from a string code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "READER" => Some(UserRole::Reader),
            "AUTHOR" => Some(UserRole::Author),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Whether this role may create blog posts
    pub fn can_author(&self) -> bool {
        matches!(self, UserRole::Author | UserRole::Admin)
    }

    /// Whether this role may manage other users' posts
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Reader
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for role in [UserRole::Reader, UserRole::Author, UserRole::Admin] {
            assert_eq!(UserRole::from_id(role.id()), Some(role));
        }
        assert_eq!(UserRole::from_id(99), None);
    }

    #[test]
    fn test_code_roundtrip() {
        for role in [UserRole::Reader, UserRole::Author, UserRole::Admin] {
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
        assert_eq!(UserRole::from_code("reader"), Some(UserRole::Reader));
        assert_eq!(UserRole::from_code("MODERATOR"), None);
    }

    #[test]
    fn test_default_is_reader() {
        assert_eq!(UserRole::default(), UserRole::Reader);
        assert!(!UserRole::Reader.can_author());
        assert!(UserRole::Author.can_author());
        assert!(UserRole::Admin.is_admin());
    }
}
