use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::activation::CODE_FIELD;

/// Parsed form fields, as handed over by the surrounding request handler.
pub type FormData = HashMap<String, String>;

/// What the caller asked the sign-in page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Plain page view.
    #[default]
    Render,
    SignIn,
    Activate,
}

/// Who receives the result; decides how unexpected failures are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Browser form post / page view. Gets generic, non-leaking messages.
    Interactive,
    /// AJAX / API client. Gets structured errors.
    Programmatic,
}

/// Everything the workflow needs to know about one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    pub host: String,
    /// Path of the current page, always starting with `/`.
    pub path: String,
    pub secure: bool,
    pub ajax: bool,
    pub action: RequestAction,
    pub form: FormData,
    /// Activation token taken from the page URL (e.g. an emailed link).
    pub route_code: Option<String>,
    /// URL stored before an auth-required redirect sent the user here.
    pub intended_url: Option<String>,
}

impl AuthRequest {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') { path } else { format!("/{path}") };
        Self {
            host: host.into(),
            path,
            ..Default::default()
        }
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn ajax(mut self, ajax: bool) -> Self {
        self.ajax = ajax;
        self
    }

    pub fn sign_in(mut self, form: FormData) -> Self {
        self.action = RequestAction::SignIn;
        self.form = form;
        self
    }

    pub fn activate(mut self, form: FormData) -> Self {
        self.action = RequestAction::Activate;
        self.form = form;
        self
    }

    pub fn with_route_code(mut self, code: impl Into<String>) -> Self {
        self.route_code = Some(code.into());
        self
    }

    pub fn with_intended_url(mut self, url: impl Into<String>) -> Self {
        self.intended_url = Some(url.into());
        self
    }

    pub fn audience(&self) -> Audience {
        if self.ajax {
            Audience::Programmatic
        } else {
            Audience::Interactive
        }
    }

    /// Raw activation token carried by this request, if any.
    ///
    /// On an activation submission the posted `code` field takes precedence
    /// over the URL parameter; other requests only look at the URL. Empty
    /// values count as absent; anything else (even whitespace) is a token.
    pub fn activation_code(&self) -> Option<&str> {
        let posted = match self.action {
            RequestAction::Activate => self.form.get(CODE_FIELD).map(String::as_str),
            _ => None,
        };
        posted
            .filter(|c| !c.is_empty())
            .or_else(|| self.route_code.as_deref().filter(|c| !c.is_empty()))
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }
}
