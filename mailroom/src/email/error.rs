//! Email error types

use thiserror::Error;

/// Errors that can occur when composing, rendering or delivering an email
#[derive(Debug, Error)]
pub enum MailError {
    /// No compiled template carries the requested name
    #[error("email template not found: {0}")]
    TemplateNotFound(String),

    /// Two bundled templates share a name
    #[error("duplicate email template: {0}")]
    DuplicateTemplate(String),

    /// Template compilation or rendering error
    #[error("failed to render email template: {0}")]
    Template(#[from] minijinja::Error),

    /// Invalid email address format
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The outbound message could not be assembled
    #[error("failed to build email message: {0}")]
    Message(String),

    /// The relay rejected the message or could not be reached
    #[error("SMTP error: {0}")]
    Transmission(String),

    /// The configured transport could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// No email has been sent yet, so no transport exists
    #[error("email transport has not been resolved yet")]
    NotResolved,

    /// Captured emails were requested from a non-capture transport
    #[error("email transport is not the capture transport")]
    NotCaptureTransport,

    /// Nothing was captured for the recipient
    #[error("no email captured for {0}")]
    NotCaptured(String),
}

impl MailError {
    /// Create a transmission error from a string message
    #[must_use]
    pub fn transmission<T: Into<String>>(msg: T) -> Self {
        Self::Transmission(msg.into())
    }

    /// Create a message building error from a string message
    #[must_use]
    pub fn message<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

/// Errors raised while resolving the active transport
///
/// A resolution outcome is computed once per [`Dispatcher`](super::Dispatcher)
/// and handed to every later caller, so this type is cheap to clone and
/// comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The configured driver name is not recognized
    #[error("invalid email driver '{0}'")]
    UnknownDriver(String),

    /// The transport could not be built from its settings
    #[error("email configuration error: {0}")]
    Config(String),
}

impl ResolveError {
    /// Create a configuration error from a string message
    #[must_use]
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}
