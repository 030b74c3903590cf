//! Input validation rules for credentials and contacts.
//!
//! The request DTOs in the API crate apply these through `validator` derives;
//! the session service re-checks credentials with [`validate_credentials`]
//! before anything reaches the credential store.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Minimum username length, in characters.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum contact name length, in characters.
pub const MIN_CONTACT_NAME_LEN: usize = 2;

/// Two-digit area code (optionally parenthesised), optional mobile `9`, then
/// eight digits with an optional dash in the middle.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\d{2}\)?[\s-]?9?\d{4}-?\d{4}$").expect("phone pattern is a valid regex")
});

/// Check the credential contract: non-empty username and password that meet
/// the minimum length thresholds.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), CoreError> {
    let username_len = username.trim().chars().count();
    if username_len < MIN_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "username must be at least {MIN_USERNAME_LEN} characters long"
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Check a contact name after trimming surrounding whitespace.
pub fn validate_contact_name(name: &str) -> Result<(), CoreError> {
    if name.trim().chars().count() < MIN_CONTACT_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name must be at least {MIN_CONTACT_NAME_LEN} characters long"
        )));
    }
    Ok(())
}

/// Returns `true` if `phone` is an accepted contact phone number.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// `validator` custom rule for phone fields.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("phone must look like (12) 99999-8888")))
    }
}

/// Flatten `validator` errors into a single human-readable message.
///
/// Fields are sorted so the message is stable across runs.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid ({})", e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
