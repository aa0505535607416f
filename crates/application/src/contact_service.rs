//! Contact submission handling: validation, email rendering, delivery.
//!
//! A submission is validated, rendered into the owner-notification email, and
//! handed to the email collaborator. Nothing is stored; the one outbound call
//! is the only side effect.

use std::sync::Arc;

use async_trait::async_trait;

use hereiam_core::AppResult;
use hereiam_domain::ContactSubmission;
use hereiam_domain::contact::ContactInput;

/// Fixed subject line for owner notifications.
const SUBJECT: &str = "HereIAm - Contact Form Submission";

/// Port for sending emails. Infrastructure provides resend, SMTP, or console
/// implementations.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends an email with a plain-text body and an optional HTML body.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()>;
}

/// Application service for the contact form.
#[derive(Clone)]
pub struct ContactService {
    email_service: Arc<dyn EmailService>,
    recipient: String,
}

impl ContactService {
    /// Creates a contact service delivering to the site owner's address.
    /// The sender identity is fixed by the email adapter.
    #[must_use]
    pub fn new(email_service: Arc<dyn EmailService>, recipient: impl Into<String>) -> Self {
        Self {
            email_service,
            recipient: recipient.into(),
        }
    }

    /// Validates the payload and forwards it to the owner's inbox.
    pub async fn submit(&self, input: ContactInput) -> AppResult<()> {
        let submission = ContactSubmission::parse(input)?;

        let text_body = render_text(&submission);
        let html_body = render_html(&submission);

        self.email_service
            .send_email(&self.recipient, SUBJECT, &text_body, Some(&html_body))
            .await
    }
}

fn render_text(submission: &ContactSubmission) -> String {
    format!(
        "New message from the website contact form.\n\n\
         Name: {}\n\
         Email: {}\n\n\
         {}",
        submission.name(),
        submission.email(),
        submission.message(),
    )
}

/// Renders the notification email. Field values are escaped so submitted
/// text cannot break out of the markup in the recipient's mail client.
fn render_html(submission: &ContactSubmission) -> String {
    let name = escape_html(submission.name());
    let email = escape_html(submission.email());
    let message = escape_html(submission.message());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Contact Form Submission</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333333; margin: 0; padding: 0;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e1e1e1; border-radius: 5px;">
    <div style="background-color: #4338ca; padding: 20px; border-radius: 5px 5px 0 0; text-align: center;">
      <h1 style="color: #ffffff; margin: 0; font-size: 24px;">Here I Am</h1>
    </div>
    <div style="padding: 20px;">
      <p style="font-size: 16px; margin-top: 0;">You have received a new message from your website contact form.</p>
      <table style="width: 100%; border-collapse: collapse;">
        <tr>
          <td style="padding: 10px 0; font-weight: bold; width: 100px;">Name:</td>
          <td style="padding: 10px 0;">{name}</td>
        </tr>
        <tr>
          <td style="padding: 10px 0; font-weight: bold;">Email:</td>
          <td style="padding: 10px 0;"><a href="mailto:{email}" style="color: #4338ca; text-decoration: none;">{email}</a></td>
        </tr>
      </table>
      <h2 style="font-size: 18px; color: #4338ca; border-bottom: 1px solid #e1e1e1; padding-bottom: 10px;">Message:</h2>
      <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; white-space: pre-wrap;">{message}</div>
    </div>
  </div>
</body>
</html>"#
    )
}

/// Minimal HTML escaping for text interpolated into the email body.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
