//! Post-authentication redirect resolution.

use serde::{Deserialize, Serialize};

use crate::AuthRequest;

/// Form field that may override the configured redirect.
pub const REDIRECT_FIELD: &str = "redirect";

/// Where the caller should be sent next.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum RedirectTarget {
    Location(String),
    /// Reload the page the request came from.
    Refresh,
}

impl RedirectTarget {
    pub fn location(url: impl Into<String>) -> Self {
        Self::Location(url.into())
    }

    pub fn site_root() -> Self {
        Self::Location("/".to_string())
    }
}

/// Configured post-sign-in redirect.
///
/// Textual form (env/config): `disabled` (or `0`), `refresh` (or empty),
/// anything else is a page URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RedirectSetting {
    #[default]
    Disabled,
    Refresh,
    Page(String),
}

impl From<&str> for RedirectSetting {
    fn from(value: &str) -> Self {
        match value.trim() {
            "0" | "disabled" | "none" => Self::Disabled,
            "" | "refresh" => Self::Refresh,
            page => Self::Page(page.to_string()),
        }
    }
}

impl From<String> for RedirectSetting {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<RedirectSetting> for String {
    fn from(value: RedirectSetting) -> Self {
        match value {
            RedirectSetting::Disabled => "disabled".to_string(),
            RedirectSetting::Refresh => "refresh".to_string(),
            RedirectSetting::Page(page) => page,
        }
    }
}

/// Request-derived inputs to redirect resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedirectContext<'a> {
    /// `redirect` form field, if posted.
    pub posted: Option<&'a str>,
    /// URL stored before an auth-required redirect.
    pub intended: Option<&'a str>,
}

impl<'a> From<&'a AuthRequest> for RedirectContext<'a> {
    fn from(request: &'a AuthRequest) -> Self {
        Self {
            posted: request.field(REDIRECT_FIELD),
            intended: request.intended_url.as_deref(),
        }
    }
}

/// Decides where to go after a successful sign-in.
///
/// Must be a pure function of its configuration and `context`: no IO, and
/// repeated calls with the same inputs return the same target.
pub trait RedirectResolver {
    /// `None` means "no opinion"; the caller falls back to its own default.
    fn resolve(&self, context: &RedirectContext<'_>, prefer_intended: bool) -> Option<RedirectTarget>;
}

/// Resolver backed by a [`RedirectSetting`].
///
/// - `Disabled` → none; `Refresh` → [`RedirectTarget::Refresh`], whatever was posted.
/// - For `Page`, a posted local path (`/...`, not `//...`) replaces the URL.
/// - With `prefer_intended`, a stored intended URL wins over the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredRedirect {
    setting: RedirectSetting,
}

impl ConfiguredRedirect {
    pub fn new(setting: RedirectSetting) -> Self {
        Self { setting }
    }

    pub fn setting(&self) -> &RedirectSetting {
        &self.setting
    }
}

impl RedirectResolver for ConfiguredRedirect {
    fn resolve(&self, context: &RedirectContext<'_>, prefer_intended: bool) -> Option<RedirectTarget> {
        let configured = match &self.setting {
            RedirectSetting::Disabled => return None,
            RedirectSetting::Refresh => return Some(RedirectTarget::Refresh),
            RedirectSetting::Page(page) => page.as_str(),
        };
        let page = context.posted.filter(|p| is_local_path(p)).unwrap_or(configured);

        let url = match context.intended {
            Some(intended) if prefer_intended && !intended.is_empty() => intended,
            _ => page,
        };
        Some(RedirectTarget::location(url))
    }
}

/// Same-site absolute path; rejects scheme-relative `//host` URLs.
fn is_local_path(value: &str) -> bool {
    value.starts_with('/') && !value.starts_with("//") && !value.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(posted: Option<&'a str>, intended: Option<&'a str>) -> RedirectContext<'a> {
        RedirectContext { posted, intended }
    }

    #[test]
    fn disabled_resolves_to_none() {
        let r = ConfiguredRedirect::default();
        assert_eq!(r.resolve(&ctx(None, None), true), None);
        assert_eq!(r.resolve(&ctx(None, Some("/account")), true), None);
    }

    #[test]
    fn refresh_ignores_intended() {
        let r = ConfiguredRedirect::new(RedirectSetting::Refresh);
        assert_eq!(r.resolve(&ctx(None, Some("/account")), true), Some(RedirectTarget::Refresh));
    }

    #[test]
    fn page_is_used_without_intended() {
        let r = ConfiguredRedirect::new(RedirectSetting::Page("/dashboard".into()));
        assert_eq!(r.resolve(&ctx(None, None), true), Some(RedirectTarget::location("/dashboard")));
    }

    #[test]
    fn intended_wins_only_when_preferred() {
        let r = ConfiguredRedirect::new(RedirectSetting::Page("/dashboard".into()));
        assert_eq!(
            r.resolve(&ctx(None, Some("/orders/7")), true),
            Some(RedirectTarget::location("/orders/7"))
        );
        assert_eq!(
            r.resolve(&ctx(None, Some("/orders/7")), false),
            Some(RedirectTarget::location("/dashboard"))
        );
    }

    #[test]
    fn posted_local_path_replaces_configured_page() {
        let r = ConfiguredRedirect::new(RedirectSetting::Page("/dashboard".into()));
        assert_eq!(
            r.resolve(&ctx(Some("/cart"), None), false),
            Some(RedirectTarget::location("/cart"))
        );
    }

    #[test]
    fn posted_path_cannot_override_disabled_or_refresh() {
        let disabled = ConfiguredRedirect::default();
        assert_eq!(disabled.resolve(&ctx(Some("/cart"), None), false), None);
        assert_eq!(disabled.resolve(&ctx(Some("/cart"), Some("/orders")), true), None);

        let refresh = ConfiguredRedirect::new(RedirectSetting::Refresh);
        assert_eq!(
            refresh.resolve(&ctx(Some("/cart"), None), true),
            Some(RedirectTarget::Refresh)
        );
    }

    #[test]
    fn posted_external_urls_are_ignored() {
        let r = ConfiguredRedirect::new(RedirectSetting::Page("/dashboard".into()));
        for posted in ["https://evil.example", "//evil.example", "/\\evil.example", "cart"] {
            assert_eq!(
                r.resolve(&ctx(Some(posted), None), false),
                Some(RedirectTarget::location("/dashboard")),
                "{posted}"
            );
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let r = ConfiguredRedirect::new(RedirectSetting::Page("/home".into()));
        let c = ctx(Some("/cart"), Some("/orders"));
        assert_eq!(r.resolve(&c, true), r.resolve(&c, true));
        assert_eq!(r.resolve(&c, false), r.resolve(&c, false));
    }

    #[test]
    fn setting_parses_textual_forms() {
        assert_eq!(RedirectSetting::from("0"), RedirectSetting::Disabled);
        assert_eq!(RedirectSetting::from("disabled"), RedirectSetting::Disabled);
        assert_eq!(RedirectSetting::from(""), RedirectSetting::Refresh);
        assert_eq!(RedirectSetting::from(" /home "), RedirectSetting::Page("/home".into()));
    }

    #[test]
    fn setting_round_trips_through_serde() {
        let s: RedirectSetting = serde_json::from_str("\"/welcome\"").unwrap();
        assert_eq!(s, RedirectSetting::Page("/welcome".into()));
        assert_eq!(serde_json::to_string(&RedirectSetting::Refresh).unwrap(), "\"refresh\"");
    }
}
