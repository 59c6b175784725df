use core::str::FromStr;

use thiserror::Error;

use userforms_core::UserId;

/// Separator between the user id and the activation code.
pub const TOKEN_SEPARATOR: char = '!';

/// Form field that carries a posted activation token.
pub const CODE_FIELD: &str = "code";

/// Any token that is not exactly `<user id>!<code>`.
///
/// Deliberately carries no detail: every malformation is reported the same
/// way so callers cannot tell which part was wrong.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("malformed activation token")]
pub struct MalformedToken;

/// Activation link payload, parsed from `"<user id>!<code>"`.
///
/// # Invariants
/// - Exactly one separator.
/// - Both parts non-empty after trimming; stored trimmed.
#[derive(Clone, PartialEq, Eq)]
pub struct ActivationToken {
    user_id: UserId,
    code: String,
}

impl ActivationToken {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl FromStr for ActivationToken {
    type Err = MalformedToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(TOKEN_SEPARATOR);
        let (Some(user_id), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MalformedToken);
        };

        let code = code.trim();
        if code.is_empty() {
            return Err(MalformedToken);
        }
        let user_id = UserId::new(user_id).map_err(|_| MalformedToken)?;

        Ok(Self {
            user_id,
            code: code.to_string(),
        })
    }
}

// The code is a bearer secret; keep it out of logs.
impl core::fmt::Debug for ActivationToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActivationToken")
            .field("user_id", &self.user_id)
            .field("code", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_token() {
        let token: ActivationToken = "42!abc123".parse().unwrap();
        assert_eq!(token.user_id().as_str(), "42");
        assert_eq!(token.code(), "abc123");
    }

    #[test]
    fn parts_are_trimmed() {
        let token: ActivationToken = " 42 ! abc ".parse().unwrap();
        assert_eq!(token.user_id().as_str(), "42");
        assert_eq!(token.code(), "abc");
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for raw in ["", "!", "42", "42!", "!abc", "  !abc", "42!   ", "a!b!c", "42!!abc"] {
            assert_eq!(raw.parse::<ActivationToken>(), Err(MalformedToken), "{raw:?}");
        }
    }

    #[test]
    fn debug_hides_code() {
        let token: ActivationToken = "42!supersecret".parse().unwrap();
        let rendered = format!("{token:?}");
        assert!(rendered.contains("42"));
        assert!(!rendered.contains("supersecret"));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: two non-blank parts without separators always parse.
            #[test]
            fn well_formed_tokens_parse(id in "[0-9a-z]{1,12}", code in "[0-9A-Za-z]{1,40}") {
                let token: ActivationToken = format!("{id}!{code}").parse().unwrap();
                prop_assert_eq!(token.user_id().as_str(), id.as_str());
                prop_assert_eq!(token.code(), code.as_str());
            }

            /// Property: more than one separator never yields a partial match.
            #[test]
            fn extra_separators_fail(parts in prop::collection::vec("[a-z0-9]{0,6}", 3..6)) {
                let raw = parts.join("!");
                prop_assert_eq!(raw.parse::<ActivationToken>(), Err(MalformedToken));
            }

            /// Property: a blank side always fails regardless of the other side.
            #[test]
            fn blank_side_fails(blank in "[ \t]{0,4}", other in "[a-z0-9]{1,8}", left in any::<bool>()) {
                let raw = if left { format!("{blank}!{other}") } else { format!("{other}!{blank}") };
                prop_assert_eq!(raw.parse::<ActivationToken>(), Err(MalformedToken));
            }
        }
    }
}
