use crate::{
    AuthConfig, AuthRequest, ConfiguredRedirect, ForceSecure, LoginMode, RedirectContext,
    RedirectResolver, RedirectTarget, TransportPolicy,
};

/// Behavior shared by account pages (sign-in, registration, password reset).
///
/// The sign-in workflow holds one of these rather than being one; only the
/// operations sign-in needs are exposed here.
#[derive(Debug, Clone)]
pub struct AccountOperations<T = ForceSecure, R = ConfiguredRedirect> {
    config: AuthConfig,
    transport: T,
    redirects: R,
}

impl AccountOperations {
    /// Stock transport and redirect policies driven by `config`.
    pub fn from_config(config: AuthConfig) -> Self {
        let transport = ForceSecure::new(config.force_secure);
        let redirects = ConfiguredRedirect::new(config.redirect.clone());
        Self::new(config, transport, redirects)
    }
}

impl<T, R> AccountOperations<T, R>
where
    T: TransportPolicy,
    R: RedirectResolver,
{
    pub fn new(config: AuthConfig, transport: T, redirects: R) -> Self {
        Self {
            config,
            transport,
            redirects,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn login_mode(&self) -> LoginMode {
        self.config.login_mode
    }

    pub fn secure_redirect(&self, request: &AuthRequest) -> Option<RedirectTarget> {
        self.transport.requires_secure_redirect(request)
    }

    pub fn resolve_redirect(&self, request: &AuthRequest, prefer_intended: bool) -> Option<RedirectTarget> {
        self.redirects
            .resolve(&RedirectContext::from(request), prefer_intended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedirectSetting;

    #[test]
    fn from_config_wires_stock_policies() {
        let ops = AccountOperations::from_config(AuthConfig {
            force_secure: true,
            redirect: RedirectSetting::Page("/home".into()),
            login_mode: LoginMode::Username,
            ..AuthConfig::default()
        });

        let req = AuthRequest::new("example.com", "/login");
        assert_eq!(
            ops.secure_redirect(&req),
            Some(RedirectTarget::location("https://example.com/login"))
        );
        assert_eq!(ops.resolve_redirect(&req, true), Some(RedirectTarget::location("/home")));
        assert_eq!(ops.login_mode(), LoginMode::Username);
    }

    struct Never;

    impl TransportPolicy for Never {
        fn requires_secure_redirect(&self, _: &AuthRequest) -> Option<RedirectTarget> {
            None
        }
    }

    struct Fixed(&'static str);

    impl RedirectResolver for Fixed {
        fn resolve(&self, _: &RedirectContext<'_>, _: bool) -> Option<RedirectTarget> {
            Some(RedirectTarget::location(self.0))
        }
    }

    #[test]
    fn custom_policies_are_used() {
        let ops = AccountOperations::new(
            AuthConfig {
                force_secure: true,
                ..AuthConfig::default()
            },
            Never,
            Fixed("/custom"),
        );
        let req = AuthRequest::new("example.com", "/login");
        assert_eq!(ops.secure_redirect(&req), None);
        assert_eq!(ops.resolve_redirect(&req, false), Some(RedirectTarget::location("/custom")));
    }
}
