//! Contracts the workflow needs from the identity store and session layer.
//!
//! Implementations live outside this crate (storage, sessions, password
//! hashing are not our concern); see `userforms-infra` for an in-memory one.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use userforms_core::UserId;

use crate::Credentials;

/// Failure reported by an identity provider.
///
/// `InvalidCredentials` and `UnknownUser` are expected rejections while
/// authenticating. Everything else is unexpected and handled by audience.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", content = "detail", rename_all = "snake_case")]
pub enum ProviderError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unknown user")]
    UnknownUser,

    #[error("identity provider timed out")]
    Timeout,

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable(detail.into())
    }

    /// Whether this is a normal "no" to an authentication attempt.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::UnknownUser)
    }
}

/// A user record as seen by the workflow.
pub trait UserAccount {
    fn id(&self) -> &UserId;

    fn is_banned(&self) -> bool;

    /// Check `code` against the pending activation and activate on match.
    ///
    /// `Ok(false)` means the code was rejected (wrong code, nothing pending).
    fn attempt_activation(&self, code: &str) -> Result<bool, ProviderError>;
}

/// Identity store + session establishment.
///
/// Calls may block on IO; timeouts are the provider's job and come back as
/// [`ProviderError::Timeout`].
pub trait IdentityProvider {
    type User: UserAccount;

    /// Verify credentials and establish an authenticated session.
    fn authenticate(&self, credentials: &Credentials, remember: bool) -> Result<Self::User, ProviderError>;

    fn find_user_by_id(&self, id: &UserId) -> Result<Option<Self::User>, ProviderError>;

    /// Tear down the current session, if any.
    fn logout(&self);
}

/// Read-only view of the current session.
pub trait SessionContext {
    fn current_user(&self) -> Option<UserId>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

impl<P> IdentityProvider for Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    type User = P::User;

    fn authenticate(&self, credentials: &Credentials, remember: bool) -> Result<Self::User, ProviderError> {
        (**self).authenticate(credentials, remember)
    }

    fn find_user_by_id(&self, id: &UserId) -> Result<Option<Self::User>, ProviderError> {
        (**self).find_user_by_id(id)
    }

    fn logout(&self) {
        (**self).logout()
    }
}

impl<S> SessionContext for Arc<S>
where
    S: SessionContext + ?Sized,
{
    fn current_user(&self) -> Option<UserId> {
        (**self).current_user()
    }

    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

/// Session with nobody signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl SessionContext for Anonymous {
    fn current_user(&self) -> Option<UserId> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_distinguished_from_faults() {
        assert!(ProviderError::InvalidCredentials.is_rejection());
        assert!(ProviderError::UnknownUser.is_rejection());
        assert!(!ProviderError::Timeout.is_rejection());
        assert!(!ProviderError::unavailable("db down").is_rejection());
    }

    #[test]
    fn provider_errors_serialize_for_programmatic_clients() {
        let json = serde_json::to_value(ProviderError::unavailable("db down")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "unavailable", "detail": "db down"}));

        let json = serde_json::to_value(ProviderError::Timeout).unwrap();
        assert_eq!(json, serde_json::json!({"error": "timeout"}));
    }

    #[test]
    fn anonymous_session_is_unauthenticated() {
        assert!(!Anonymous.is_authenticated());
        assert_eq!(Arc::new(Anonymous).current_user(), None);
    }
}
