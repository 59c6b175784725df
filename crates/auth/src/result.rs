use serde::Serialize;

use userforms_core::FieldErrors;

use crate::RedirectTarget;

/// Why an authentication or activation attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    InvalidCredentials,
    AccountBanned,
    InvalidToken,
    UnknownUser,
    ActivationRejected,
    /// A pre-authentication hook denied the attempt.
    Vetoed,
    /// The identity provider failed unexpectedly (timeout, outage).
    Unclassified,
}

impl core::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            FailureReason::InvalidCredentials => "invalid_credentials",
            FailureReason::AccountBanned => "account_banned",
            FailureReason::InvalidToken => "invalid_token",
            FailureReason::UnknownUser => "unknown_user",
            FailureReason::ActivationRejected => "activation_rejected",
            FailureReason::Vetoed => "vetoed",
            FailureReason::Unclassified => "unclassified",
        };
        f.write_str(s)
    }
}

/// Terminal outcome of one pass through the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuthResult {
    /// `redirect: None` leaves the landing page to the caller.
    Success {
        redirect: Option<RedirectTarget>,
        message: Option<String>,
    },
    ValidationFailure {
        errors: FieldErrors,
    },
    AuthFailure {
        reason: FailureReason,
        message: String,
    },
    /// Nothing to do; render the form.
    NoOp {
        show_titles: bool,
    },
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success { .. })
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            AuthResult::AuthFailure { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// One-line message to flash on the next rendered page, if any.
    pub fn flash(&self) -> Option<Flash> {
        match self {
            AuthResult::Success {
                message: Some(message),
                ..
            } => Some(Flash::success(message.clone())),
            AuthResult::ValidationFailure { errors } => errors.first_message().map(Flash::error),
            AuthResult::AuthFailure { message, .. } => Some(Flash::error(message.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// Message for the render layer to display once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// What `handle_request` tells the surrounding request handler to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "directive", content = "value", rename_all = "snake_case")]
pub enum Response {
    /// Re-issue the request over a secure transport. Nothing else happened.
    SecureRedirect(RedirectTarget),
    /// Already signed in; go here instead of showing the form.
    Redirect(RedirectTarget),
    Outcome(AuthResult),
}

impl Response {
    pub fn outcome(&self) -> Option<&AuthResult> {
        match self {
            Response::Outcome(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<AuthResult> {
        match self {
            Response::Outcome(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_picks_the_user_facing_message() {
        let ok = AuthResult::Success {
            redirect: Some(RedirectTarget::site_root()),
            message: Some("Activated".into()),
        };
        assert_eq!(ok.flash(), Some(Flash::success("Activated")));

        let silent = AuthResult::Success {
            redirect: None,
            message: None,
        };
        assert_eq!(silent.flash(), None);

        let invalid = AuthResult::ValidationFailure {
            errors: FieldErrors::single("code", "Invalid activation code supplied."),
        };
        assert_eq!(invalid.flash(), Some(Flash::error("Invalid activation code supplied.")));

        assert_eq!(AuthResult::NoOp { show_titles: true }.flash(), None);
    }

    #[test]
    fn results_serialize_with_outcome_tag() {
        let result = AuthResult::AuthFailure {
            reason: FailureReason::AccountBanned,
            message: "banned".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"outcome": "auth_failure", "reason": "account_banned", "message": "banned"})
        );
        assert_eq!(result.failure_reason(), Some(FailureReason::AccountBanned));
        assert_eq!(FailureReason::AccountBanned.to_string(), "account_banned");
    }

    #[test]
    fn response_exposes_outcome() {
        let response = Response::Outcome(AuthResult::NoOp { show_titles: false });
        assert!(response.outcome().is_some());
        assert!(Response::Redirect(RedirectTarget::Refresh).into_outcome().is_none());
    }
}
