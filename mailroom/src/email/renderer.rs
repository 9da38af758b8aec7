//! Two-stage email rendering
//!
//! A message is first rendered into its own content template, then the
//! result is wrapped into the shared `layout.html` together with the subject.
//! Every notification therefore shares one header and footer while only the
//! inner content varies.

use std::collections::HashSet;

use minijinja::{context, Environment, ErrorKind, Value};

use super::{Composer, MailError, Site};

/// Name of the shared wrapper template
pub const LAYOUT_TEMPLATE: &str = "layout.html";

/// Bundled templates, compiled once by [`Renderer::new`]
///
/// Content templates are named `<template_name>.html`.
pub const TEMPLATE_SOURCES: &[(&str, &str)] = &[
    (LAYOUT_TEMPLATE, include_str!("../../templates/email/layout.html")),
    (
        "book_approved.html",
        include_str!("../../templates/email/book_approved.html"),
    ),
    (
        "book_rejected.html",
        include_str!("../../templates/email/book_rejected.html"),
    ),
    (
        "changes_approved.html",
        include_str!("../../templates/email/changes_approved.html"),
    ),
    (
        "changes_rejected.html",
        include_str!("../../templates/email/changes_rejected.html"),
    ),
    (
        "confirm_email.html",
        include_str!("../../templates/email/confirm_email.html"),
    ),
    (
        "confirm_email_change.html",
        include_str!("../../templates/email/confirm_email_change.html"),
    ),
    (
        "password_reset.html",
        include_str!("../../templates/email/password_reset.html"),
    ),
];

/// Compiled, read-only template set
///
/// Nothing is mutated after construction, so a renderer can be shared
/// across threads (usually behind an `Arc`) without locking.
///
/// Undefined variables render as an empty string rather than failing.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
    site: Site,
}

impl Renderer {
    /// Compile the bundled template set
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled template fails to compile. Callers are
    /// expected to treat this as fatal at startup.
    pub fn new(site: Site) -> Result<Self, MailError> {
        Self::from_sources(site, TEMPLATE_SOURCES.iter().copied())
    }

    /// Compile an arbitrary template set
    ///
    /// # Errors
    ///
    /// - [`MailError::DuplicateTemplate`] if two sources share a name
    /// - [`MailError::Template`] if a source has a syntax error
    /// - [`MailError::TemplateNotFound`] if the set has no [`LAYOUT_TEMPLATE`]
    pub fn from_sources<N, S>(
        site: Site,
        sources: impl IntoIterator<Item = (N, S)>,
    ) -> Result<Self, MailError>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        let mut seen = HashSet::new();
        for (name, source) in sources {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(MailError::DuplicateTemplate(name));
            }
            env.add_template_owned(name, source.into())?;
        }

        if !seen.contains(LAYOUT_TEMPLATE) {
            return Err(MailError::TemplateNotFound(LAYOUT_TEMPLATE.to_string()));
        }

        tracing::debug!(templates = seen.len(), "Email templates compiled");

        Ok(Self { env, site })
    }

    /// Site used to compute message variables
    #[must_use]
    pub const fn site(&self) -> &Site {
        &self.site
    }

    /// Whether a content template exists for `template_name`
    #[must_use]
    pub fn has_template(&self, template_name: &str) -> bool {
        self.env.get_template(&file_name(template_name)).is_ok()
    }

    /// Render a message into the final HTML body
    ///
    /// # Errors
    ///
    /// Returns [`MailError::TemplateNotFound`] if the message names an unknown
    /// template, or [`MailError::Template`] on a rendering failure.
    pub fn render(&self, message: &dyn Composer) -> Result<String, MailError> {
        let name = file_name(message.template_name());
        let content = self.env.get_template(&name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                MailError::TemplateNotFound(name.clone())
            } else {
                e.into()
            }
        })?;

        let body = content.render(message.variables(&self.site))?;

        let layout = self.env.get_template(LAYOUT_TEMPLATE)?;
        let html = layout.render(context! {
            subject => message.subject(),
            body => Value::from_safe_string(body),
        })?;

        Ok(html)
    }
}

fn file_name(template_name: &str) -> String {
    format!("{template_name}.html")
}
