//! Validation of identifiers and command line values
//!
//! Plugin ids and event names are case-insensitive identifiers. They are
//! normalised to lower case before they reach the repository.

use crate::core::error_handling::ContextualError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("identifier pattern is valid")
});

/// A value failed validation; the message is meant for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Validate a plugin id or event name and return its normalised form
///
/// `kind` names the value in the error message ("plugin id", "event name").
pub fn normalize_identifier(kind: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{} must not be empty", kind)));
    }
    if !IDENTIFIER.is_match(trimmed) {
        return Err(ValidationError::new(format!(
            "{} '{}' must start with a letter or underscore and contain only letters, digits, '_' or '-'",
            kind, trimmed
        )));
    }
    Ok(trimmed.to_lowercase())
}

/// Split a `KEY=VALUE` command line argument
pub fn parse_key_value(arg: &str) -> Result<(String, String), ValidationError> {
    let (key, value) = arg.split_once('=').ok_or_else(|| {
        ValidationError::new(format!("argument '{}' is not in KEY=VALUE form", arg))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::new(format!(
            "argument '{}' has an empty key",
            arg
        )));
    }
    Ok((key.to_string(), value.to_string()))
}
