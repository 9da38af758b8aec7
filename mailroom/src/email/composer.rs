//! The message descriptor contract
//!
//! Every notification type describes itself through [`Composer`]: a fixed
//! subject, the name of the content template it renders with, and the
//! variables that template reads.

use std::collections::BTreeMap;
use std::fmt;

use minijinja::Value;

use super::Site;

/// Template variables, keyed by placeholder name
pub type Variables = BTreeMap<String, Value>;

/// A notifiable event that can be rendered into an email
///
/// Variable computation must be pure: implementations combine their own
/// fields with the [`Site`] and never perform I/O.
///
/// # Examples
///
/// ```rust
/// use mailroom::email::{vars, Composer, Site, Variables};
/// use minijinja::Value;
///
/// #[derive(Debug)]
/// struct Welcome {
///     username: String,
/// }
///
/// impl Composer for Welcome {
///     fn subject(&self) -> &str {
///         "Welcome!"
///     }
///
///     fn template_name(&self) -> &str {
///         "welcome"
///     }
///
///     fn variables(&self, site: &Site) -> Variables {
///         vars([
///             ("username", Value::from(self.username.as_str())),
///             ("home_url", Value::from_safe_string(site.link(&[]))),
///         ])
///     }
/// }
/// ```
pub trait Composer: fmt::Debug + Send + Sync {
    /// Subject line, without the product prefix
    fn subject(&self) -> &str;

    /// Name of the content template, without the `.html` extension
    fn template_name(&self) -> &str;

    /// Variables exposed to the content template
    fn variables(&self, site: &Site) -> Variables;
}

/// Collect `(name, value)` pairs into [`Variables`]
#[must_use]
pub fn vars<const N: usize>(pairs: [(&str, Value); N]) -> Variables {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Mark a crate-composed link as trusted markup so it is not escaped
pub(crate) fn link_value(url: String) -> Value {
    Value::from_safe_string(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vars_keys() {
        let variables = vars([("b", Value::from(2)), ("a", Value::from("one"))]);
        let keys: Vec<_> = variables.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(variables["a"], Value::from("one"));
    }

    #[test]
    fn test_link_value_is_safe() {
        let value = link_value("https://gopl.dev/books/abc/".to_string());
        assert!(value.is_safe());
    }
}
