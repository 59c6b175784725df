//! Infrastructure layer: identity store, sessions, stock sign-in hooks.

pub mod hooks;
pub mod identity;


pub use hooks::{AuditHook, BlockedDomains};
pub use identity::{
    InMemoryAccount, InMemoryIdentityProvider, InMemorySession, InMemoryUserStore, SessionRecord,
    StoredUser,
};
