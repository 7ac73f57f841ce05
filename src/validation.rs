//! Field-level checks shared by the request DTOs.
//!
//! Messages are collected rather than returned on the first failure, so a
//! single response lists every field that needs fixing.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::AppError;

// `\w` is ASCII-only here: letters, digits and underscore.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .unicode(false)
        .build()
        .expect("Invalid email regex pattern")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    /// A field that must be present and non-blank. Returns the trimmed value.
    pub fn required(&mut self, value: Option<String>, message: &str) -> Option<String> {
        match trimmed(value) {
            Some(value) => Some(value),
            None => {
                self.0.push(message.to_string());
                None
            }
        }
    }

    /// A field that may be omitted, but must not be blank when supplied.
    pub fn optional(&mut self, value: Option<String>, message: &str) -> Option<String> {
        let supplied = value.is_some();
        let value = trimmed(value);
        if supplied && value.is_none() {
            self.0.push(message.to_string());
        }
        value
    }

    pub fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.0.push(message.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(self.0)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
