//! Strongly-typed identifiers used across the workflow.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a user account as the identity store knows it.
///
/// Stores hand out whatever key they use (numeric row ids, UUIDs, ...), so the
/// value is opaque. It is never empty and never carries surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        value.as_ref().parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("UserId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id: UserId = "  42 ".parse().unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(matches!(UserId::new("   "), Err(DomainError::InvalidId(_))));
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn serde_rejects_blank_ids() {
        let id: UserId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(id, UserId::new("7").unwrap());
        assert!(serde_json::from_str::<UserId>("\" \"").is_err());
    }
}
