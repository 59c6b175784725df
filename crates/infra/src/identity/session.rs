use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use userforms_auth::SessionContext;
use userforms_core::UserId;

/// An authenticated session as tracked by [`InMemorySession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// Opaque session token (UUIDv7, time-ordered).
    pub token: Uuid,
    pub user_id: UserId,
    pub remember: bool,
    pub issued_at: DateTime<Utc>,
}

/// Single-slot session for one client.
///
/// Intended for tests/dev. A poisoned lock reads as "signed out".
#[derive(Debug, Default)]
pub struct InMemorySession {
    current: Mutex<Option<SessionRecord>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user_id`, replacing any existing one.
    pub fn start(&self, user_id: UserId, remember: bool) -> SessionRecord {
        let record = SessionRecord {
            token: Uuid::now_v7(),
            user_id,
            remember,
            issued_at: Utc::now(),
        };
        if let Ok(mut current) = self.current.lock() {
            *current = Some(record.clone());
        }
        record
    }

    /// End the session, returning what was there.
    pub fn end(&self) -> Option<SessionRecord> {
        self.current.lock().ok().and_then(|mut current| current.take())
    }

    pub fn record(&self) -> Option<SessionRecord> {
        self.current.lock().ok().and_then(|current| current.clone())
    }
}

impl SessionContext for InMemorySession {
    fn current_user(&self) -> Option<UserId> {
        self.record().map(|r| r.user_id)
    }
}
