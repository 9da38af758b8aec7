//! Delivery transports
//!
//! Two variants exist and the set is closed:
//! - **SMTP**: renders the message and pushes it to a mail relay
//! - **Capture**: records the message in memory, keyed by recipient
//!
//! The active variant is picked by [`Driver`] name at resolution time.

pub mod capture;
pub mod smtp;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use super::{Composer, MailError, ResolveError};

pub use capture::CaptureTransport;
pub use smtp::SmtpTransport;

/// Capability to deliver a message to one recipient
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `message` to `to`
    ///
    /// A single attempt is made; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the message cannot be rendered, addressed or
    /// transmitted
    async fn send(&self, to: &str, message: Arc<dyn Composer>) -> Result<(), MailError>;
}

/// Transport driver names accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// `smtp`: deliver through a mail relay
    Smtp,
    /// `test`: keep messages in memory
    Capture,
}

impl Driver {
    /// Configuration name of the driver
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smtp => "smtp",
            Self::Capture => "test",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smtp" => Ok(Self::Smtp),
            "test" => Ok(Self::Capture),
            other => Err(ResolveError::UnknownDriver(other.to_string())),
        }
    }
}

/// The resolved transport of a dispatcher
#[derive(Debug)]
pub enum ActiveTransport {
    /// Relay-backed delivery
    Smtp(SmtpTransport),
    /// In-memory capture
    Capture(CaptureTransport),
}

impl ActiveTransport {
    /// Driver this transport was resolved from
    #[must_use]
    pub const fn driver(&self) -> Driver {
        match self {
            Self::Smtp(_) => Driver::Smtp,
            Self::Capture(_) => Driver::Capture,
        }
    }

    /// The capture store, when this is the capture variant
    #[must_use]
    pub const fn as_capture(&self) -> Option<&CaptureTransport> {
        match self {
            Self::Capture(capture) => Some(capture),
            Self::Smtp(_) => None,
        }
    }
}

#[async_trait]
impl Transport for ActiveTransport {
    async fn send(&self, to: &str, message: Arc<dyn Composer>) -> Result<(), MailError> {
        match self {
            Self::Smtp(smtp) => smtp.send(to, message).await,
            Self::Capture(capture) => capture.send(to, message).await,
        }
    }
}
