//! Session Token Signing and Verification
//!
//! Sessions are stateless: the token carries the claims itself, signed
//! with HMAC-SHA256. No session table is consulted on request.
//!
//! Token format: `base64url(claims_json).base64url(hmac_sha256)`.
//! Revocation before expiry is only possible by rotating the secret.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::UserRole;
use crate::error::{AuthError, AuthResult};
use platform::cookie::extract_cookie;

type HmacSha256 = Hmac<Sha256>;

/// Claims carried inside a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user's id
    pub sub: Uuid,
    pub username: String,
    pub role: UserRole,
    /// Expiry as unix seconds
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(sub: Uuid, username: String, role: UserRole, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub,
            username,
            role,
            exp: expires_at.timestamp(),
        }
    }

    /// Sign the claims into a token string
    pub fn sign(&self, secret: &[u8; 32]) -> AuthResult<String> {
        let payload = serde_json::to_vec(self)
            .map_err(|e| AuthError::Internal(format!("Claims serialization failed: {e}")))?;
        let encoded = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| AuthError::Internal(format!("HMAC key error: {e}")))?;
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{encoded}.{signature}"))
    }

    /// Verify a token and return its claims
    ///
    /// Rejects malformed tokens, bad signatures and expired claims.
    pub fn verify(token: &str, secret: &[u8; 32], now: DateTime<Utc>) -> AuthResult<Self> {
        let (encoded, signature) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;

        let mut mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| AuthError::Internal(format!("HMAC key error: {e}")))?;
        mac.update(encoded.as_bytes());

        let given = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::SessionInvalid)?;
        // Constant-time comparison inside verify_slice
        mac.verify_slice(&given)
            .map_err(|_| AuthError::SessionInvalid)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| AuthError::SessionInvalid)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::SessionInvalid)?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::SessionInvalid);
        }

        Ok(claims)
    }
}

/// Authenticate an incoming request from its headers
///
/// Accepts either an `Authorization: Bearer <token>` header or the
/// session cookie. Returns the verified claims or `SessionInvalid`.
pub fn authenticate_request(headers: &HeaderMap, config: &AuthConfig) -> AuthResult<SessionClaims> {
    let token = bearer_token(headers)
        .or_else(|| extract_cookie(headers, &config.session_cookie_name))
        .ok_or(AuthError::SessionInvalid)?;

    SessionClaims::verify(&token, &config.session_secret, Utc::now())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn secret() -> [u8; 32] {
        [7u8; 32]
    }

    fn claims(expires_at: DateTime<Utc>) -> SessionClaims {
        SessionClaims::new(
            Uuid::new_v4(),
            "booklover".to_string(),
            UserRole::Reader,
            expires_at,
        )
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let original = claims(Utc::now() + Duration::days(365));
        let token = original.sign(&secret()).unwrap();

        let verified = SessionClaims::verify(&token, &secret(), Utc::now()).unwrap();
        assert_eq!(verified, original);
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = claims(Utc::now() + Duration::days(1))
            .sign(&secret())
            .unwrap();
        let err = SessionClaims::verify(&token, &[8u8; 32], Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = claims(Utc::now() - Duration::seconds(1))
            .sign(&secret())
            .unwrap();
        let err = SessionClaims::verify(&token, &secret(), Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let token = claims(Utc::now() + Duration::days(1))
            .sign(&secret())
            .unwrap();
        let (payload, sig) = token.split_once('.').unwrap();

        // Swap the payload for different claims, keep the old signature
        let other = claims(Utc::now() + Duration::days(1));
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&other).unwrap());
        assert_ne!(forged_payload, payload);

        let forged = format!("{forged_payload}.{sig}");
        assert!(SessionClaims::verify(&forged, &secret(), Utc::now()).is_err());
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        for bad in ["", "nodot", "a.b.c", "!!!.???"] {
            assert!(SessionClaims::verify(bad, &secret(), Utc::now()).is_err());
        }
    }

    #[test]
    fn test_authenticate_request_bearer() {
        let config = AuthConfig::development();
        let token = claims(Utc::now() + Duration::days(1))
            .sign(&config.session_secret)
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );

        assert!(authenticate_request(&headers, &config).is_ok());
    }

    #[test]
    fn test_authenticate_request_cookie() {
        let config = AuthConfig::development();
        let token = claims(Utc::now() + Duration::days(1))
            .sign(&config.session_secret)
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            format!("{}={token}", config.session_cookie_name)
                .parse()
                .unwrap(),
        );

        assert!(authenticate_request(&headers, &config).is_ok());
    }

    #[test]
    fn test_authenticate_request_missing_token() {
        let config = AuthConfig::development();
        let headers = HeaderMap::new();
        assert!(matches!(
            authenticate_request(&headers, &config),
            Err(AuthError::SessionInvalid)
        ));
    }
}
