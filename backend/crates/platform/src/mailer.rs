//! Outbound Mail Transport
//!
//! Thin abstraction over the transactional-mail HTTP API so the application
//! layer depends on a trait and tests can substitute a recording fake.

use serde::Serialize;
use thiserror::Error;

/// Mail transport errors
#[derive(Debug, Error)]
pub enum MailError {
    /// Transport-level failure (connection, TLS, timeout)
    #[error("Mail transport failed: {0}")]
    Transport(String),

    /// The mail API rejected the request
    #[error("Mail API returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Missing or invalid configuration
    #[error("Mail configuration error: {0}")]
    Config(String),
}

/// Mail transport configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP endpoint of the mail API
    pub endpoint: String,
    /// API key sent in the `api-key` header
    pub api_key: String,
    /// Sender address
    pub sender_email: String,
    /// Sender display name
    pub sender_name: Option<String>,
}

impl MailConfig {
    pub fn from_env() -> Result<Self, MailError> {
        let require = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| MailError::Config(format!("{key} is required")))
        };

        Ok(Self {
            endpoint: std::env::var("MAIL_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string()),
            api_key: require("MAIL_API_KEY")?,
            sender_email: require("MAIL_SENDER_EMAIL")?,
            sender_name: std::env::var("MAIL_SENDER_NAME").ok(),
        })
    }
}

/// Mail transport trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Send an HTML email to a single recipient
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError>;
}

// ============================================================================
// HTTP API transport
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiSendBody {
    sender: ApiAddress,
    to: Vec<ApiAddress>,
    subject: String,
    html_content: String,
}

/// Mail transport over the transactional-mail HTTP API
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let body = ApiSendBody {
            sender: ApiAddress {
                email: self.config.sender_email.clone(),
                name: self.config.sender_name.clone(),
            },
            to: vec![ApiAddress {
                email: to.to_string(),
                name: None,
            }],
            subject: subject.to_string(),
            html_content: html.to_string(),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %to, subject = %subject, "Email sent");

        Ok(())
    }
}

// ============================================================================
// Development transport
// ============================================================================

/// Mail transport that only logs, for local development without a mail key
#[derive(Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        tracing::info!(
            to = %to,
            subject = %subject,
            body_len = html.len(),
            "Email suppressed (log transport)"
        );
        Ok(())
    }
}
