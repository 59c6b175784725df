//! Domain error model.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures. Provider and transport
/// concerns belong to the crates that talk to those collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. empty after trimming).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Human-readable validation messages keyed by form field.
///
/// Fields are kept in a sorted map so rendering and serialization are stable.
/// Each field keeps its messages in the order the rules were evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// First message of the first field, used when only one line can be shown.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().flatten().next().map(String::as_str)
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("login", "Please enter your email");
        errors.add("password", "Please enter your password");
        errors.add("login", "second");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("login"), ["Please enter your email", "second"]);
        assert!(errors.get("code").is_empty());
        assert_eq!(errors.first_message(), Some("Please enter your email"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let errors = FieldErrors::single("code", "Invalid activation code supplied.");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"code":["Invalid activation code supplied."]}"#);
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = FieldErrors::new();
        errors.add("login", "a");
        errors.add("password", "b");
        assert_eq!(errors.to_string(), "login: a; password: b");
    }
}
