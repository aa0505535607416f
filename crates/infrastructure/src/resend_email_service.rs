//! Email service backed by the Resend HTTP API.
//!
//! One `POST /emails` call per message, authenticated with the API key.
//! Transport or non-success responses surface as `DeliveryFailed`; nothing
//! is retried.

use async_trait::async_trait;
use hereiam_application::EmailService;
use hereiam_core::{AppError, AppResult};
use serde::Serialize;

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// Resend implementation of the email service port.
#[derive(Clone)]
pub struct ResendEmailService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    from_address: String,
}

impl ResendEmailService {
    /// Creates a service using the production API endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, from_address)
    }

    /// Creates a service against a custom endpoint (used by tests).
    #[must_use]
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        from_address: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()> {
        let payload = SendEmailRequest {
            from: &self.from_address,
            to: [to],
            subject,
            text: text_body,
            html: html_body,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| AppError::DeliveryFailed(format!("resend call failed: {error}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::DeliveryFailed(format!(
                "resend rejected the message (status {status}): {detail}"
            )));
        }

        Ok(())
    }
}
