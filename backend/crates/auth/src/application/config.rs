//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use sha2::{Digest, Sha256};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Secret key for HMAC token signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session token TTL (365 days)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(365 * 24 * 3600), // 365 days
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// `SESSION_SECRET` is required; it is stretched to 32 bytes with
    /// SHA-256 so operators can use any passphrase. `PASSWORD_PEPPER`
    /// and `COOKIE_SECURE` are optional.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let secret = std::env::var("SESSION_SECRET")?;
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v != "false")
            .unwrap_or(true);
        let password_pepper = std::env::var("PASSWORD_PEPPER")
            .ok()
            .map(|p| p.into_bytes());

        Ok(Self {
            session_secret: Self::derive_secret(secret.as_bytes()),
            cookie_secure,
            password_pepper,
            ..Default::default()
        })
    }

    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_bytes(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Stretch an arbitrary-length secret to the 32-byte key
    fn derive_secret(raw: &[u8]) -> [u8; 32] {
        let digest = Sha256::digest(raw);
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        key
    }

    /// Get session TTL in seconds
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
