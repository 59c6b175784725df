//! Field rules applied to sign-in forms before any authentication attempt.

use std::collections::HashMap;

use regex::Regex;

use userforms_core::FieldErrors;

use crate::{Credentials, LoginMode, Messages};

pub const LOGIN_FIELD: &str = "login";
pub const PASSWORD_FIELD: &str = "password";

/// Fallback fields consulted, in order, when a form has no `login` field.
const LOGIN_FALLBACKS: [&str; 2] = ["username", "email"];

const USERNAME_LENGTH: (usize, usize) = (2, 255);
const EMAIL_LENGTH: (usize, usize) = (6, 255);
const PASSWORD_LENGTH: (usize, usize) = (4, 255);

/// Basic email format check.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Validates raw form fields into [`Credentials`].
///
/// - No IO
/// - Never panics on malformed input; malformed input is the expected failure
#[derive(Debug, Clone, Default)]
pub struct CredentialValidator {
    messages: Messages,
}

impl CredentialValidator {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    pub fn validate(
        &self,
        data: &HashMap<String, String>,
        mode: LoginMode,
    ) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();

        let login = self.check_login(data, mode, &mut errors);
        let password = self.check_password(data, &mut errors);

        match (login, password) {
            (Some(login), Some(password)) => Ok(Credentials::new(login, password)),
            _ => Err(errors),
        }
    }

    /// `Some` only when no error was recorded for the login field.
    fn check_login<'a>(
        &self,
        data: &'a HashMap<String, String>,
        mode: LoginMode,
        errors: &mut FieldErrors,
    ) -> Option<&'a str> {
        let Some(login) = effective_login(data) else {
            errors.add(LOGIN_FIELD, self.messages.login_required(mode.attribute()));
            return None;
        };

        let before = errors.len();
        let (min, max) = match mode {
            LoginMode::Username => USERNAME_LENGTH,
            LoginMode::Email => {
                if !valid_email(login) {
                    errors.add(LOGIN_FIELD, self.messages.invalid_email(LOGIN_FIELD));
                }
                EMAIL_LENGTH
            }
        };
        if !within(login, min, max) {
            errors.add(LOGIN_FIELD, self.messages.length_between(LOGIN_FIELD, min, max));
        }
        (errors.len() == before).then_some(login)
    }

    fn check_password<'a>(
        &self,
        data: &'a HashMap<String, String>,
        errors: &mut FieldErrors,
    ) -> Option<&'a str> {
        let Some(password) = present(data, PASSWORD_FIELD) else {
            errors.add(PASSWORD_FIELD, self.messages.password_required.clone());
            return None;
        };

        let (min, max) = PASSWORD_LENGTH;
        if !within(password, min, max) {
            errors.add(PASSWORD_FIELD, self.messages.length_between(PASSWORD_FIELD, min, max));
            return None;
        }
        Some(password)
    }
}

/// `login`, else `username`, else `email`, trimmed.
///
/// Fallbacks only apply when the form has no `login` key at all; an empty
/// `login` field is reported as missing rather than silently replaced.
fn effective_login(data: &HashMap<String, String>) -> Option<&str> {
    if data.contains_key(LOGIN_FIELD) {
        return present(data, LOGIN_FIELD).map(str::trim);
    }
    LOGIN_FALLBACKS
        .iter()
        .find(|field| data.contains_key(**field))
        .and_then(|field| present(data, field))
        .map(str::trim)
}

/// Field value unless absent or blank.
fn present<'a>(data: &'a HashMap<String, String>, field: &str) -> Option<&'a str> {
    data.get(field)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    (min..=max).contains(&len)
}
