//! Deployment configuration for the sign-in component.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{LoginMode, Messages, RedirectSetting};

pub const ENV_LOGIN_MODE: &str = "USERFORMS_LOGIN_MODE";
pub const ENV_REDIRECT: &str = "USERFORMS_REDIRECT";
pub const ENV_SHOW_TITLES: &str = "USERFORMS_SHOW_TITLES";
pub const ENV_FORCE_SECURE: &str = "USERFORMS_FORCE_SECURE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings the workflow reads; every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub login_mode: LoginMode,
    pub redirect: RedirectSetting,
    /// Display-only: whether the form shows field titles.
    pub show_titles: bool,
    /// Upgrade plain-HTTP page views to HTTPS.
    pub force_secure: bool,
    pub messages: Messages,
}

impl AuthConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Defaults overridden by `USERFORMS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_LOGIN_MODE) {
            config.login_mode = value.parse().map_err(|reason| ConfigError::InvalidValue {
                key: ENV_LOGIN_MODE,
                value: value.clone(),
                reason,
            })?;
        }
        if let Some(value) = lookup(ENV_REDIRECT) {
            config.redirect = RedirectSetting::from(value);
        }
        if let Some(value) = lookup(ENV_SHOW_TITLES) {
            config.show_titles = parse_flag(ENV_SHOW_TITLES, &value)?;
        }
        if let Some(value) = lookup(ENV_FORCE_SECURE) {
            config.force_secure = parse_flag(ENV_FORCE_SECURE, &value)?;
        }

        tracing::debug!(
            login_mode = %config.login_mode,
            force_secure = config.force_secure,
            "loaded sign-in configuration"
        );
        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
