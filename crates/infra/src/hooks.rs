//! Stock pre-authentication hooks.

use userforms_auth::{BeforeAuthenticate, LoginMode};
use userforms_events::{Hook, HookDecision};

/// Records every sign-in attempt that reaches the hook chain.
///
/// Logs the login mode and audience only; credentials stay out of the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditHook;

impl Hook<BeforeAuthenticate> for AuditHook {
    fn name(&self) -> &str {
        "audit"
    }

    fn call(&self, event: &mut BeforeAuthenticate) -> HookDecision {
        tracing::info!(
            login_mode = %event.login_mode,
            audience = ?event.audience,
            "sign-in attempt"
        );
        HookDecision::Allow
    }
}

/// Refuses email logins from the listed domains.
///
/// Only applies in [`LoginMode::Email`]; usernames carry no domain.
#[derive(Debug, Clone)]
pub struct BlockedDomains {
    domains: Vec<String>,
    message: String,
}

impl BlockedDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().trim_start_matches('@').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            message: "Sign-in with this email address is not allowed.".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn is_blocked(&self, login: &str) -> bool {
        let Some((_, domain)) = login.rsplit_once('@') else {
            return false;
        };
        let domain = domain.to_ascii_lowercase();
        self.domains.iter().any(|d| *d == domain)
    }
}

impl Hook<BeforeAuthenticate> for BlockedDomains {
    fn name(&self) -> &str {
        "blocked-domains"
    }

    fn call(&self, event: &mut BeforeAuthenticate) -> HookDecision {
        if event.login_mode == LoginMode::Email && self.is_blocked(event.credentials.login()) {
            return HookDecision::deny(self.message.clone());
        }
        HookDecision::Allow
    }
}
