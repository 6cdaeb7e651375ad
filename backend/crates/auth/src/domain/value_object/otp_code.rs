//! OTP Code Value Object
//!
//! メール検証用のワンタイムコード。
//!
//! ## 設計方針
//! - 6桁の16進数文字列（小文字）。約1677万通り
//! - OsRng で生成（予測不可能性を確保）
//! - 比較は定数時間で行う（タイミング攻撃対策）

use platform::crypto::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of hex characters in a verification code
pub const OTP_CODE_LENGTH: usize = 6;

/// One-time verification code sent by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a fresh random code
    pub fn generate() -> Self {
        let value: u32 = OsRng.gen_range(0..0x1000000);
        Self(format!("{value:06x}"))
    }

    /// Wrap a stored code (assumed already in canonical form)
    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Compare against user input in constant time
    ///
    /// Input is trimmed and lowercased before comparison so that
    /// `3FA2B1` matches a stored `3fa2b1`.
    pub fn matches(&self, input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        constant_time_eq(self.0.as_bytes(), normalized.as_bytes())
    }

    /// Raw code string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
