use serde::{Deserialize, Serialize};

/// User-facing message catalog.
///
/// Placeholders (`{attribute}`, `{field}`, `{min}`, `{max}`) are substituted
/// by the callers. Translation is the embedding application's job; it can
/// swap the whole catalog through [`AuthConfig`](crate::AuthConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub login_required: String,
    pub password_required: String,
    pub invalid_email: String,
    pub length_between: String,
    pub invalid_activation_code: String,
    pub activation_success: String,
    pub invalid_credentials: String,
    pub account_banned: String,
    pub generic_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            login_required: "Please enter your {attribute}".to_string(),
            password_required: "Please enter your password".to_string(),
            invalid_email: "The {field} must be a valid email address.".to_string(),
            length_between: "The {field} must be between {min} and {max} characters.".to_string(),
            invalid_activation_code: "Invalid activation code supplied.".to_string(),
            activation_success: "Successfully activated your account.".to_string(),
            invalid_credentials: "The details you entered did not match our records.".to_string(),
            account_banned: "Sorry, this account has been suspended. Please contact us for further assistance.".to_string(),
            generic_error: "Something went wrong while processing your request. Please try again later.".to_string(),
        }
    }
}

impl Messages {
    pub fn login_required(&self, attribute: &str) -> String {
        self.login_required.replace("{attribute}", attribute)
    }

    pub fn invalid_email(&self, field: &str) -> String {
        self.invalid_email.replace("{field}", field)
    }

    pub fn length_between(&self, field: &str, min: usize, max: usize) -> String {
        self.length_between
            .replace("{field}", field)
            .replace("{min}", &min.to_string())
            .replace("{max}", &max.to_string())
    }
}
