//! Book moderation outcomes

use minijinja::Value;

use crate::email::composer::{link_value, vars};
use crate::email::{Composer, Site, Variables};

/// Sent when a submitted book has been approved and published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookApproved {
    /// Title of the book
    pub book_name: String,
    /// Submitter's username
    pub username: String,
    /// Public identifier used in the book URL
    pub public_id: String,
}

impl Composer for BookApproved {
    fn subject(&self) -> &str {
        "Your book is online!"
    }

    fn template_name(&self) -> &str {
        "book_approved"
    }

    fn variables(&self, site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            ("book_name", Value::from(self.book_name.as_str())),
            (
                "view_book_url",
                link_value(site.link(&["books", self.public_id.as_str()])),
            ),
        ])
    }
}

/// Sent when a submitted book is rejected by moderation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRejected {
    /// Moderator's explanation
    pub note: String,
    /// Title of the book
    pub book_name: String,
    /// Submitter's username
    pub username: String,
}

impl Composer for BookRejected {
    fn subject(&self) -> &str {
        "Your book wasn’t approved"
    }

    fn template_name(&self) -> &str {
        "book_rejected"
    }

    fn variables(&self, _site: &Site) -> Variables {
        vars([
            ("username", Value::from(self.username.as_str())),
            ("book_name", Value::from(self.book_name.as_str())),
            ("note", Value::from(self.note.as_str())),
        ])
    }
}
