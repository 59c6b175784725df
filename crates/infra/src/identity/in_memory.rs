use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use userforms_auth::{Credentials, IdentityProvider, LoginMode, ProviderError, UserAccount};
use userforms_core::UserId;

use super::session::InMemorySession;

/// A user row.
///
/// Passwords are kept as given: this store is for tests/dev and hashing is
/// the real identity store's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub banned: bool,
    /// Pending activation code; `None` once activated (or never issued).
    pub activation_code: Option<String>,
    pub activated_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            banned: false,
            activation_code: None,
            activated_at: None,
        }
    }

    pub fn banned(mut self) -> Self {
        self.banned = true;
        self
    }

    pub fn pending_activation(mut self, code: impl Into<String>) -> Self {
        self.activation_code = Some(code.into());
        self
    }

    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }

    fn matches_login(&self, mode: LoginMode, login: &str) -> bool {
        match mode {
            LoginMode::Email => self.email.eq_ignore_ascii_case(login),
            LoginMode::Username => self.username == login,
        }
    }
}

/// Shared user table.
///
/// - No IO
/// - Safe to share across threads (`Arc<InMemoryUserStore>`)
/// - Supports fault injection to exercise provider-failure paths
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<UserId, StoredUser>>,
    fault: Mutex<Option<ProviderError>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: StoredUser) -> Result<(), ProviderError> {
        self.users()?.insert(user.id.clone(), user);
        Ok(())
    }

    pub fn get(&self, id: &UserId) -> Result<Option<StoredUser>, ProviderError> {
        Ok(self.users()?.get(id).cloned())
    }

    pub fn find_by_login(&self, mode: LoginMode, login: &str) -> Result<Option<StoredUser>, ProviderError> {
        Ok(self
            .users()?
            .values()
            .find(|u| u.matches_login(mode, login))
            .cloned())
    }

    /// Make every following call fail with `fault` (or succeed again with `None`).
    pub fn set_fault(&self, fault: Option<ProviderError>) {
        if let Ok(mut slot) = self.fault.lock() {
            *slot = fault;
        }
    }

    /// Consume the pending code if `code` matches it.
    pub fn activate(&self, id: &UserId, code: &str) -> Result<bool, ProviderError> {
        let mut users = self.users()?;
        let Some(user) = users.get_mut(id) else {
            return Ok(false);
        };
        if user.activation_code.as_deref() != Some(code) {
            return Ok(false);
        }
        user.activation_code = None;
        user.activated_at = Some(Utc::now());
        Ok(true)
    }

    fn users(&self) -> Result<MutexGuard<'_, HashMap<UserId, StoredUser>>, ProviderError> {
        if let Some(fault) = self.fault.lock().ok().and_then(|f| f.clone()) {
            return Err(fault);
        }
        self.users
            .lock()
            .map_err(|_| ProviderError::unavailable("user store lock poisoned"))
    }
}

/// Handle to a stored user, as returned by [`InMemoryIdentityProvider`].
#[derive(Debug, Clone)]
pub struct InMemoryAccount {
    id: UserId,
    banned: bool,
    store: Arc<InMemoryUserStore>,
}

impl UserAccount for InMemoryAccount {
    fn id(&self) -> &UserId {
        &self.id
    }

    fn is_banned(&self) -> bool {
        self.banned
    }

    fn attempt_activation(&self, code: &str) -> Result<bool, ProviderError> {
        self.store.activate(&self.id, code)
    }
}

/// [`IdentityProvider`] over an [`InMemoryUserStore`] and one client session.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityProvider {
    store: Arc<InMemoryUserStore>,
    session: Arc<InMemorySession>,
    login_mode: LoginMode,
}

impl InMemoryIdentityProvider {
    pub fn new(store: Arc<InMemoryUserStore>, session: Arc<InMemorySession>, login_mode: LoginMode) -> Self {
        Self {
            store,
            session,
            login_mode,
        }
    }

    pub fn store(&self) -> &Arc<InMemoryUserStore> {
        &self.store
    }

    pub fn session(&self) -> &Arc<InMemorySession> {
        &self.session
    }

    fn account(&self, user: &StoredUser) -> InMemoryAccount {
        InMemoryAccount {
            id: user.id.clone(),
            banned: user.banned,
            store: self.store.clone(),
        }
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    type User = InMemoryAccount;

    fn authenticate(&self, credentials: &Credentials, remember: bool) -> Result<Self::User, ProviderError> {
        let user = self
            .store
            .find_by_login(self.login_mode, credentials.login())?
            .ok_or(ProviderError::UnknownUser)?;

        if user.password != credentials.password() {
            return Err(ProviderError::InvalidCredentials);
        }

        let record = self.session.start(user.id.clone(), remember);
        tracing::debug!(user_id = %record.user_id, remember, "session started");
        Ok(self.account(&user))
    }

    fn find_user_by_id(&self, id: &UserId) -> Result<Option<Self::User>, ProviderError> {
        Ok(self.store.get(id)?.map(|user| self.account(&user)))
    }

    fn logout(&self) {
        if let Some(record) = self.session.end() {
            tracing::debug!(user_id = %record.user_id, "session ended");
        }
    }
}
