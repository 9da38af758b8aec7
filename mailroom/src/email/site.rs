//! Product identity and absolute link composition for email content

/// The product an email is sent on behalf of
///
/// Carries the product name and the public base URL of the server so that
/// messages can embed absolute links without reaching for global state.
///
/// # Examples
///
/// ```rust
/// use mailroom::email::Site;
///
/// let site = Site::new("gopl", "https://gopl.dev/");
/// assert_eq!(site.link(&["books", "abc123"]), "https://gopl.dev/books/abc123/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    name: String,
    base_url: String,
}

impl Site {
    /// Create a site from a product name and a base URL
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            name: name.into(),
            base_url,
        }
    }

    /// Product name, as shown to recipients
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute link from path parts
    ///
    /// Each part is stripped of leading and trailing `/` and empty parts are
    /// skipped, so `["/books/", "abc"]` and `["books", "/abc/"]` produce the
    /// same link. Slashes inside a part are kept. The result always ends
    /// with `/`.
    #[must_use]
    pub fn link(&self, parts: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for part in parts {
            let part = part.trim_matches('/');
            if part.is_empty() {
                continue;
            }
            url.push('/');
            url.push_str(part);
        }
        url.push('/');
        url
    }
}
