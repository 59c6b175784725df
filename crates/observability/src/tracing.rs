//! Tracing/logging initialization.
//!
//! Filtering follows `RUST_LOG`; output format follows `USERFORMS_LOG_FORMAT`
//! (`json`, the default, or `pretty`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FORMAT: &str = "USERFORMS_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format: {0:?} (expected \"json\" or \"pretty\")")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives; `None` falls back to `RUST_LOG`, then `info`.
    pub filter: Option<String>,
    /// Route output through the test harness capture.
    pub test_writer: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: None,
            test_writer: false,
        }
    }
}

impl LogConfig {
    /// Read the format from the process environment.
    ///
    /// An unrecognised format is reported on stderr and replaced by JSON; logging
    /// is not up yet at this point.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup(ENV_LOG_FORMAT).map(|raw| raw.parse::<LogFormat>()) {
            Some(Ok(format)) => format,
            Some(Err(err)) => {
                eprintln!("{err}; using json");
                LogFormat::Json
            }
            None => LogFormat::Json,
        };
        Self {
            format,
            ..Self::default()
        }
    }

    /// Settings for unit/integration tests: readable output, captured per test.
    pub fn for_tests() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: Some("debug".to_string()),
            test_writer: true,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.filter {
            Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        }
    }
}

/// Initialize tracing/logging from the environment.
pub fn init() {
    init_with(&LogConfig::from_env());
}

/// Install a global subscriber for `config`.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_with(config: &LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match (config.format, config.test_writer) {
        (LogFormat::Json, false) => builder.json().try_init(),
        (LogFormat::Json, true) => builder.json().with_test_writer().try_init(),
        (LogFormat::Pretty, false) => builder.pretty().try_init(),
        (LogFormat::Pretty, true) => builder.pretty().with_test_writer().try_init(),
    };
    installed.is_ok()
}
