//! Moderation outcomes for proposed entity changes

use minijinja::Value;

use crate::email::composer::{link_value, vars};
use crate::email::{Composer, Site, Variables};

/// Sent when proposed changes to an entity have been approved and applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesApproved {
    /// Author's username
    pub username: String,
    /// Title of the changed entity
    pub entity_title: String,
    /// Path of the entity page, relative to the server base URL
    pub view_url: String,
}

impl Composer for ChangesApproved {
    fn subject(&self) -> &str {
        "Your changes have been approved!"
    }

    fn template_name(&self) -> &str {
        "changes_approved"
    }

    fn variables(&self, site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            ("entity_title", Value::from(self.entity_title.as_str())),
            ("view_url", link_value(site.link(&[self.view_url.as_str()]))),
        ])
    }
}

/// Sent when proposed changes to an entity have been rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesRejected {
    /// Author's username
    pub username: String,
    /// Title of the entity
    pub entity_title: String,
    /// Moderator's explanation
    pub note: String,
    /// Path of the entity page, relative to the server base URL
    pub view_url: String,
}

impl Composer for ChangesRejected {
    fn subject(&self) -> &str {
        "Your changes were not approved"
    }

    fn template_name(&self) -> &str {
        "changes_rejected"
    }

    fn variables(&self, site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            ("entity_title", Value::from(self.entity_title.as_str())),
            ("note", Value::from(self.note.as_str())),
            ("view_url", link_value(site.link(&[self.view_url.as_str()]))),
        ])
    }
}
