//! Shared tracing/logging setup for the sign-in services.

/// Initialize process-wide logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use tracing::{init_with, LogConfig, LogFormat, UnknownLogFormat};
