//! Account lifecycle emails: address confirmation, address change, password reset

use minijinja::Value;

use crate::email::composer::{link_value, vars};
use crate::email::{Composer, Site, Variables};

/// Asks a newly registered user to confirm their address with a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmEmail {
    /// Username of the new account
    pub username: String,
    /// Address being confirmed
    pub email: String,
    /// One-time confirmation code
    pub code: String,
}

impl Composer for ConfirmEmail {
    fn subject(&self) -> &str {
        "Email confirmation"
    }

    fn template_name(&self) -> &str {
        "confirm_email"
    }

    fn variables(&self, site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            ("email", Value::from(self.email.as_str())),
            ("code", Value::from(self.code.as_str())),
            (
                "confirm_url",
                link_value(site.link(&["users", "confirm-email"])),
            ),
        ])
    }
}

/// Asks a user to confirm a new email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmEmailChange {
    /// Username of the account
    pub username: String,
    /// Change request token
    pub token: String,
}

impl Composer for ConfirmEmailChange {
    fn subject(&self) -> &str {
        "Confirm Your New Email Address"
    }

    fn template_name(&self) -> &str {
        "confirm_email_change"
    }

    fn variables(&self, site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            (
                "link",
                link_value(site.link(&["change-email", self.token.as_str()])),
            ),
            ("project_name", Value::from(site.name())),
            // read back by tests from captured messages
            ("token", Value::from(self.token.as_str())),
        ])
    }
}

/// Carries a password reset link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRequest {
    /// Username of the account
    pub username: String,
    /// Reset token
    pub token: String,
}

impl Composer for PasswordResetRequest {
    fn subject(&self) -> &str {
        "Password Reset Request"
    }

    fn template_name(&self) -> &str {
        "password_reset"
    }

    fn variables(&self, site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            (
                "link",
                link_value(site.link(&["password-reset", self.token.as_str()])),
            ),
            ("token", Value::from(self.token.as_str())),
        ])
    }
}
