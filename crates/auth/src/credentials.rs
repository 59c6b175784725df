use core::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Which account attribute users sign in with. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    #[default]
    Email,
    Username,
}

impl LoginMode {
    /// Name of the identity attribute used as `login`.
    pub fn attribute(&self) -> &'static str {
        match self {
            LoginMode::Email => "email",
            LoginMode::Username => "username",
        }
    }
}

impl core::fmt::Display for LoginMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.attribute())
    }
}

impl FromStr for LoginMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(LoginMode::Email),
            "username" => Ok(LoginMode::Username),
            other => Err(format!("unknown login mode '{other}'")),
        }
    }
}

/// Sign-in input handed to the identity provider.
///
/// The workflow only builds these through
/// [`CredentialValidator`](crate::CredentialValidator), so `login` is never
/// empty there. The password stays wrapped so it does not end up in `Debug`
/// output or logs.
#[derive(Debug)]
pub struct Credentials {
    login: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Replace the login (hooks may normalize it). Blank replacements are ignored.
    pub fn set_login(&mut self, login: impl Into<String>) {
        let login = login.into();
        if !login.trim().is_empty() {
            self.login = login;
        }
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}
