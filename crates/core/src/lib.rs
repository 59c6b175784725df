//! `userforms-core`: shared building blocks for the sign-in workflow.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage).

pub mod error;
pub mod id;

pub use error::{DomainError, FieldErrors};
pub use id::UserId;
