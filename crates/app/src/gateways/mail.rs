//! Transactional e-mail client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::gateways::{GatewayError, errors::upstream_message};

const EMAILS_PATH: &str = "/emails";

/// Configuration for the e-mail service.
#[derive(Debug, Clone)]
pub struct MailGatewayConfig {
    /// Service base URL, e.g. `"https://api.resend.com"`.
    pub api_url: String,

    /// API key sent as a bearer token.
    pub api_key: String,

    /// Sender address, e.g. `"Store <orders@example.com>"`.
    pub from: String,
}

/// A rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `email` from the configured sender.
    async fn send(&self, email: &Email) -> Result<(), GatewayError>;
}

/// HTTP client for the e-mail service.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    config: MailGatewayConfig,
    http: Client,
}

impl HttpMailer {
    #[must_use]
    pub fn new(config: MailGatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    #[tracing::instrument(
        name = "mail.gateway.send",
        skip(self, email),
        fields(recipients = email.to.len()),
        err
    )]
    async fn send(&self, email: &Email) -> Result<(), GatewayError> {
        if email.to.is_empty() {
            return Err(GatewayError::UnexpectedResponse(
                "e-mail has no recipients".to_owned(),
            ));
        }

        let url = format!("{}{EMAILS_PATH}", self.config.api_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&SendEmailRequest {
                from: &self.config.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(upstream_message(status, &text)));
        }

        info!("e-mail accepted");

        Ok(())
    }
}
