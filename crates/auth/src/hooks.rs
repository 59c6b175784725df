use userforms_events::HookChain;

use crate::{Audience, Credentials, LoginMode};

/// Payload handed to pre-authentication hooks.
///
/// Hooks may rewrite the login through [`Credentials::set_login`] or deny the
/// attempt; the provider only ever sees what the last hook left behind.
#[derive(Debug)]
pub struct BeforeAuthenticate {
    pub login_mode: LoginMode,
    pub audience: Audience,
    pub credentials: Credentials,
}

/// Hooks run before every authentication attempt, in registration order.
pub type SignInHooks = HookChain<BeforeAuthenticate>;
