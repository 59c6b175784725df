//! Identity provider adapters.

pub mod in_memory;
pub mod session;

pub use in_memory::{InMemoryAccount, InMemoryIdentityProvider, InMemoryUserStore, StoredUser};
pub use session::{InMemorySession, SessionRecord};
