//! `userforms-auth`: request-time sign-in and account-activation decisions.
//!
//! This crate is intentionally decoupled from HTTP, storage and rendering:
//! the identity store, sessions and transport are reached through traits, and
//! every decision comes back as a value.

pub mod account;
pub mod activation;
pub mod config;
pub mod credentials;
pub mod hooks;
pub mod identity;
pub mod messages;
pub mod redirect;
pub mod request;
pub mod result;
pub mod transport;
pub mod validator;
pub mod workflow;

pub use account::AccountOperations;
pub use activation::{ActivationToken, MalformedToken};
pub use config::{AuthConfig, ConfigError};
pub use credentials::{Credentials, LoginMode};
pub use hooks::{BeforeAuthenticate, SignInHooks};
pub use identity::{Anonymous, IdentityProvider, ProviderError, SessionContext, UserAccount};
pub use messages::Messages;
pub use redirect::{
    ConfiguredRedirect, RedirectContext, RedirectResolver, RedirectSetting, RedirectTarget,
};
pub use request::{Audience, AuthRequest, FormData, RequestAction};
pub use result::{AuthResult, FailureReason, Flash, FlashLevel, Response};
pub use transport::{ForceSecure, TransportPolicy};
pub use validator::CredentialValidator;
pub use workflow::AuthWorkflow;
