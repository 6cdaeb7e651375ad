//! Session Cookie Handling
//!
//! Builds `Set-Cookie` values for the signed session token and reads
//! cookies back off request headers. The attribute surface is fixed to
//! what an HttpOnly auth cookie needs; a general cookie jar is out of
//! scope here.

use std::fmt;

use axum::http::{HeaderMap, header};

/// SameSite policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        })
    }
}

/// Attributes of the cookie carrying the session token
///
/// `max_age_secs: None` yields a browser-session cookie; the delete form
/// always pins `Max-Age=0`.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// `Set-Cookie` value carrying `value`
    pub fn build_set_cookie(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// `Set-Cookie` value that expires the cookie immediately
    ///
    /// Carries the same attributes as the set form so the browser matches
    /// the cookie being cleared.
    pub fn build_delete_cookie(&self) -> String {
        self.render("", Some(0))
    }

    fn render(&self, value: &str, max_age_secs: Option<i64>) -> String {
        let mut parts = vec![format!("{}={value}", self.name)];
        parts.push(format!("Path={}", self.path));
        if let Some(secs) = max_age_secs {
            parts.push(format!("Max-Age={secs}"));
        }
        parts.push(format!("SameSite={}", self.same_site));
        if self.secure {
            parts.push("Secure".to_string());
        }
        if self.http_only {
            parts.push("HttpOnly".to_string());
        }
        parts.join("; ")
    }
}

/// Read a single cookie value off the request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let jar = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in jar.split(';') {
        if let Some((key, value)) = pair.split_once('=')
            && key.trim() == name
        {
            return Some(value.trim().to_string());
        }
    }
    None
}
