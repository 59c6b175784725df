use crate::{AuthRequest, RedirectTarget};

/// Decides whether a request must be re-issued over a secure transport.
///
/// Pure: signalling the redirect is the only effect.
pub trait TransportPolicy {
    fn requires_secure_redirect(&self, request: &AuthRequest) -> Option<RedirectTarget>;
}

/// Redirect plain-HTTP page views to `https://` when enabled.
///
/// AJAX requests are never redirected; a redirect response would be useless
/// to a script mid-page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForceSecure {
    enabled: bool,
}

impl ForceSecure {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl TransportPolicy for ForceSecure {
    fn requires_secure_redirect(&self, request: &AuthRequest) -> Option<RedirectTarget> {
        if !self.enabled || request.secure || request.ajax {
            return None;
        }
        Some(RedirectTarget::location(format!(
            "https://{}{}",
            request.host, request.path
        )))
    }
}
