//! Contact form submission model.
//!
//! A submission is transient request state: it exists only long enough to be
//! validated and forwarded to the email collaborator, and is never persisted.

use hereiam_core::{AppError, AppResult, FieldViolation};
use serde::Deserialize;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const EMAIL_MAX_CHARS: usize = 100;
const MESSAGE_MIN_CHARS: usize = 10;
const MESSAGE_MAX_CHARS: usize = 5000;

/// Raw contact form payload as received from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    /// Sender's name.
    pub name: String,
    /// Sender's reply address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// A contact submission that has passed every field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

impl ContactSubmission {
    /// Validates a raw payload into a submission.
    ///
    /// Collects one violation per broken constraint so the caller can report
    /// all of them at once rather than failing on the first.
    pub fn parse(input: ContactInput) -> AppResult<Self> {
        let mut violations = Vec::new();

        let name = input.name.trim();
        if name.chars().count() < NAME_MIN_CHARS {
            violations.push(FieldViolation::new(
                "name",
                "Name must be at least 2 characters",
            ));
        } else if name.chars().count() > NAME_MAX_CHARS {
            violations.push(FieldViolation::new(
                "name",
                "Name must be at most 100 characters",
            ));
        }

        let email = input.email.trim();
        if email.chars().count() > EMAIL_MAX_CHARS {
            violations.push(FieldViolation::new(
                "email",
                "Email must be at most 100 characters",
            ));
        } else if !is_plausible_address(email) {
            violations.push(FieldViolation::new("email", "Invalid email address"));
        }

        let message = input.message.trim();
        if message.chars().count() < MESSAGE_MIN_CHARS {
            violations.push(FieldViolation::new(
                "message",
                "Message must be at least 10 characters",
            ));
        } else if message.chars().count() > MESSAGE_MAX_CHARS {
            violations.push(FieldViolation::new(
                "message",
                "Message must be at most 5000 characters",
            ));
        }

        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }

    /// Sender's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender's reply address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Address shape check: one `@`, non-empty local part, dotted domain with
/// non-empty labels, no whitespace. Deliverability is the sender's problem.
fn is_plausible_address(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
