use serde::Serialize;

/// Outcome of a single hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "message", rename_all = "snake_case")]
pub enum HookDecision {
    /// Continue with the next hook (and eventually the guarded step).
    Allow,
    /// Abort the guarded step. The message is safe to show to the caller.
    Deny(String),
}

impl HookDecision {
    pub fn deny(message: impl Into<String>) -> Self {
        Self::Deny(message.into())
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A listener invoked before a guarded workflow step.
///
/// Hooks receive the payload mutably and may augment it (e.g. normalize a
/// login) before later hooks and the guarded step see it.
pub trait Hook<E>: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    fn call(&self, event: &mut E) -> HookDecision;
}

/// Adapter turning a closure into a named [`Hook`].
pub struct FnHook<F> {
    name: String,
    f: F,
}

/// Wrap `f` as a hook reported under `name`.
pub fn hook_fn<E, F>(name: impl Into<String>, f: F) -> FnHook<F>
where
    F: Fn(&mut E) -> HookDecision + Send + Sync,
{
    FnHook {
        name: name.into(),
        f,
    }
}

impl<E, F> Hook<E> for FnHook<F>
where
    F: Fn(&mut E) -> HookDecision + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, event: &mut E) -> HookDecision {
        (self.f)(event)
    }
}
