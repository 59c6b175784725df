//! Request-time sign-in and activation decisions.

use tracing::{debug, info, warn};

use userforms_core::FieldErrors;
use userforms_events::Hook;

use crate::activation::CODE_FIELD;
use crate::{
    AccountOperations, ActivationToken, Audience, AuthConfig, AuthRequest, AuthResult,
    BeforeAuthenticate, ConfiguredRedirect, CredentialValidator, FailureReason, ForceSecure,
    IdentityProvider, ProviderError, RedirectResolver, RedirectTarget, RequestAction, Response,
    SessionContext, SignInHooks, TransportPolicy, UserAccount,
};

/// Sign-in sessions are always created with "remember me" on.
const REMEMBER: bool = true;

/// Orchestrates sign-in and account activation for one deployment.
///
/// Stateless per request: everything request-specific is passed in, all
/// persistent state lives behind the [`IdentityProvider`].
pub struct AuthWorkflow<P, T = ForceSecure, R = ConfiguredRedirect> {
    account: AccountOperations<T, R>,
    validator: CredentialValidator,
    provider: P,
    hooks: SignInHooks,
}

impl<P> AuthWorkflow<P>
where
    P: IdentityProvider,
{
    pub fn new(config: AuthConfig, provider: P) -> Self {
        Self::with_account(AccountOperations::from_config(config), provider)
    }
}

impl<P, T, R> AuthWorkflow<P, T, R>
where
    P: IdentityProvider,
    T: TransportPolicy,
    R: RedirectResolver,
{
    pub fn with_account(account: AccountOperations<T, R>, provider: P) -> Self {
        let validator = CredentialValidator::new(account.config().messages.clone());
        Self {
            account,
            validator,
            provider,
            hooks: SignInHooks::new(),
        }
    }

    /// Append a pre-authentication hook.
    pub fn with_hook(mut self, hook: impl Hook<BeforeAuthenticate> + 'static) -> Self {
        self.hooks.register(hook);
        self
    }

    pub fn hooks_mut(&mut self) -> &mut SignInHooks {
        &mut self.hooks
    }

    pub fn config(&self) -> &AuthConfig {
        self.account.config()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Entry point: decide what one inbound request leads to.
    ///
    /// Order matters:
    /// 1. transport upgrade
    /// 2. activation token (even for signed-in sessions); an activation
    ///    submission without one is refused
    /// 3. signed-in redirect
    /// 4. sign-in submission
    ///
    /// `Err` is only returned to programmatic callers, for unexpected
    /// provider failures.
    pub fn handle_request(
        &self,
        request: &AuthRequest,
        session: &dyn SessionContext,
    ) -> Result<Response, ProviderError> {
        if let Some(target) = self.account.secure_redirect(request) {
            debug!(path = %request.path, "redirecting to secure transport");
            return Ok(Response::SecureRedirect(target));
        }

        if let Some(code) = request.activation_code() {
            return self.activate(code, request.audience()).map(Response::Outcome);
        }
        if request.action == RequestAction::Activate {
            return Ok(Response::Outcome(self.invalid_activation(FailureReason::InvalidToken)));
        }

        if session.is_authenticated() {
            return Ok(match self.resolve_redirect(request, true) {
                Some(target) => Response::Redirect(target),
                None => Response::Outcome(self.render()),
            });
        }

        if request.action == RequestAction::SignIn {
            return self.sign_in(request).map(Response::Outcome);
        }

        Ok(Response::Outcome(self.render()))
    }

    /// Activate an account from a `"<user id>!<code>"` token.
    ///
    /// Malformed tokens, unknown users and rejected codes all produce the
    /// same validation failure so callers cannot probe for user ids.
    pub fn activate(&self, raw: &str, audience: Audience) -> Result<AuthResult, ProviderError> {
        let token = match raw.parse::<ActivationToken>() {
            Ok(token) => token,
            Err(_) => return Ok(self.invalid_activation(FailureReason::InvalidToken)),
        };

        let user = match self.provider.find_user_by_id(token.user_id()) {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(self.invalid_activation(FailureReason::UnknownUser)),
            Err(err) if err.is_rejection() => {
                return Ok(self.invalid_activation(FailureReason::UnknownUser));
            }
            Err(err) => return self.unexpected(err, audience),
        };

        match user.attempt_activation(token.code()) {
            Ok(true) => {}
            Ok(false) => return Ok(self.invalid_activation(FailureReason::ActivationRejected)),
            Err(err) => return self.unexpected(err, audience),
        }

        info!(user_id = %user.id(), "account activated");
        Ok(AuthResult::Success {
            redirect: Some(RedirectTarget::site_root()),
            message: Some(self.config().messages.activation_success.clone()),
        })
    }

    /// Validate, run hooks, authenticate, enforce the ban, pick a redirect.
    pub fn sign_in(&self, request: &AuthRequest) -> Result<AuthResult, ProviderError> {
        let audience = request.audience();
        let login_mode = self.account.login_mode();
        let messages = &self.config().messages;

        let credentials = match self.validator.validate(&request.form, login_mode) {
            Ok(credentials) => credentials,
            Err(errors) => {
                debug!(fields = errors.len(), "sign-in form failed validation");
                return Ok(AuthResult::ValidationFailure { errors });
            }
        };

        let mut event = BeforeAuthenticate {
            login_mode,
            audience,
            credentials,
        };
        if let Err(rejected) = self.hooks.run(&mut event) {
            info!(hook = %rejected.hook, "sign-in vetoed by hook");
            return Ok(AuthResult::AuthFailure {
                reason: FailureReason::Vetoed,
                message: rejected.message,
            });
        }
        let credentials = event.credentials;

        let user = match self.provider.authenticate(&credentials, REMEMBER) {
            Ok(user) => user,
            Err(err) if err.is_rejection() => {
                info!(%login_mode, "sign-in rejected");
                return Ok(AuthResult::AuthFailure {
                    reason: FailureReason::InvalidCredentials,
                    message: messages.invalid_credentials.clone(),
                });
            }
            Err(err) => return self.unexpected(err, audience),
        };

        // The provider already opened a session; close it before answering.
        if user.is_banned() {
            self.provider.logout();
            warn!(user_id = %user.id(), "banned account signed in; session revoked");
            return Ok(AuthResult::AuthFailure {
                reason: FailureReason::AccountBanned,
                message: messages.account_banned.clone(),
            });
        }

        info!(user_id = %user.id(), %login_mode, "user signed in");
        Ok(AuthResult::Success {
            redirect: self.resolve_redirect(request, true),
            message: None,
        })
    }

    /// Pure: same configuration and request give the same answer.
    pub fn resolve_redirect(&self, request: &AuthRequest, prefer_intended: bool) -> Option<RedirectTarget> {
        self.account.resolve_redirect(request, prefer_intended)
    }

    fn render(&self) -> AuthResult {
        AuthResult::NoOp {
            show_titles: self.config().show_titles,
        }
    }

    fn invalid_activation(&self, reason: FailureReason) -> AuthResult {
        debug!(%reason, "activation refused");
        AuthResult::ValidationFailure {
            errors: FieldErrors::single(
                CODE_FIELD,
                self.config().messages.invalid_activation_code.clone(),
            ),
        }
    }

    /// Programmatic callers get the structured error; interactive callers a
    /// generic message with the detail dropped.
    fn unexpected(&self, err: ProviderError, audience: Audience) -> Result<AuthResult, ProviderError> {
        match audience {
            Audience::Programmatic => Err(err),
            Audience::Interactive => {
                warn!("identity provider failed; answering with generic message");
                Ok(AuthResult::AuthFailure {
                    reason: FailureReason::Unclassified,
                    message: self.config().messages.generic_error.clone(),
                })
            }
        }
    }
}
