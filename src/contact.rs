//! Contact form validation
//!
//! Local-only: a valid submission shows a thank-you status and resets the
//! form. Nothing is sent anywhere.

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{MIN_MESSAGE_CHARS, MIN_NAME_CHARS};

/// Permissive `something@something.something` shape, not RFC 5322
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").unwrap_or_else(|e| panic!("email pattern: {e}"))
});

pub const NAME_ERROR: &str = "Please enter your name (at least 2 characters).";
pub const EMAIL_ERROR: &str = "Please enter a valid email address.";
pub const MESSAGE_ERROR: &str = "Message should be at least 10 characters.";
pub const SUCCESS_STATUS: &str = "Thank you — your message has been recorded.";

/// Form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Input element id
    pub fn input_id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Inline error element id
    pub fn error_id(&self) -> &'static str {
        match self {
            Field::Name => "error-name",
            Field::Email => "error-email",
            Field::Message => "error-message",
        }
    }
}

/// Raw form input
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field error messages from one submit attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FormErrors {
    pub fn is_valid(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }

    /// First field with an error, for focus
    pub fn first_invalid(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| self.get(*f).is_some())
    }
}

/// Email shape check on already-trimmed input
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

impl ContactForm {
    /// Check every field in one pass
    pub fn validate(&self) -> FormErrors {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        FormErrors {
            name: (name.chars().count() < MIN_NAME_CHARS).then_some(NAME_ERROR),
            email: (!is_valid_email(email)).then_some(EMAIL_ERROR),
            message: (message.chars().count() < MIN_MESSAGE_CHARS).then_some(MESSAGE_ERROR),
        }
    }
}
