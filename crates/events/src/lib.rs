//! Synchronous, ordered hooks around workflow steps.
//!
//! Listeners are registered up front and invoked in registration order on the
//! caller's thread, so ordering and failure propagation stay explicit.

pub mod chain;
pub mod hook;

pub use chain::{HookChain, HookRejected};
pub use hook::{FnHook, Hook, HookDecision, hook_fn};
