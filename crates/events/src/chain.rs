use std::sync::Arc;

use thiserror::Error;

use crate::hook::{Hook, HookDecision};

/// Raised when a hook denies the guarded step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("rejected by hook '{hook}': {message}")]
pub struct HookRejected {
    pub hook: String,
    pub message: String,
}

/// Ordered list of hooks for one event type.
///
/// - No IO / no async
/// - Registration order is invocation order
/// - First denial wins; later hooks are not called
pub struct HookChain<E> {
    hooks: Vec<Arc<dyn Hook<E>>>,
}

impl<E> HookChain<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: impl Hook<E> + 'static) {
        self.hooks.push(Arc::new(hook));
    }

    /// Builder-style `register`.
    pub fn with(mut self, hook: impl Hook<E> + 'static) -> Self {
        self.register(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook in order against `event`.
    pub fn run(&self, event: &mut E) -> Result<(), HookRejected> {
        for hook in &self.hooks {
            match hook.call(event) {
                HookDecision::Allow => {}
                HookDecision::Deny(message) => {
                    tracing::debug!(hook = hook.name(), "hook denied event");
                    return Err(HookRejected {
                        hook: hook.name().to_string(),
                        message,
                    });
                }
            }
        }
        Ok(())
    }
}

impl<E> Default for HookChain<E> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<E> Clone for HookChain<E> {
    fn clone(&self) -> Self {
        Self {
            hooks: self.hooks.clone(),
        }
    }
}

impl<E> core::fmt::Debug for HookChain<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}
