//! SMTP transport
//!
//! Uses the `lettre` crate to deliver rendered emails through a relay.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::{Credentials, Mechanism},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::Transport;
use crate::config::EmailSettings;
use crate::email::{Composer, MailError, Renderer, ResolveError};

/// Relay-backed transport
///
/// Holds one relay client, built when the transport is resolved. Each send
/// renders the message, then awaits one relay round trip.
pub struct SmtpTransport {
    relay: AsyncSmtpTransport<Tokio1Executor>,
    renderer: Arc<Renderer>,
    from: String,
    subject_prefix: String,
}

impl SmtpTransport {
    /// Build the relay client from settings
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Config` if the relay client cannot be created
    /// (for instance, TLS parameters for the host are invalid).
    pub fn new(settings: &EmailSettings, renderer: Arc<Renderer>) -> Result<Self, ResolveError> {
        let mut builder = if settings.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| ResolveError::config(format!("SMTP relay {}: {e}", settings.host)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        builder = builder.port(settings.port);

        if !settings.username.is_empty() {
            builder = builder
                .credentials(Credentials::new(
                    settings.username.clone(),
                    settings.password.clone(),
                ))
                .authentication(vec![Mechanism::Plain]);
        }

        Ok(Self {
            relay: builder.build(),
            renderer,
            from: settings.from.clone(),
            subject_prefix: settings.subject_prefix.clone(),
        })
    }

    /// Subject line as it appears in the outbound message
    #[must_use]
    pub fn full_subject(&self, subject: &str) -> String {
        format!("{}: {subject}", self.subject_prefix)
    }

    /// Build the outbound lettre message
    fn build_message(&self, to: &str, subject: &str, body: String) -> Result<Message, MailError> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.from.clone()))?;
        let to: Mailbox = to
            .parse()
            .map_err(|_| MailError::InvalidAddress(to.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.full_subject(subject))
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| MailError::message(e.to_string()))
    }
}

impl fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpTransport")
            .field("from", &self.from)
            .field("subject_prefix", &self.subject_prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn send(&self, to: &str, message: Arc<dyn Composer>) -> Result<(), MailError> {
        let body = self.renderer.render(message.as_ref())?;
        let email = self.build_message(to, message.subject(), body)?;

        if let Err(e) = self.relay.send(email).await {
            tracing::warn!(
                to = %to,
                template = %message.template_name(),
                error = %e,
                "Failed to deliver email"
            );
            return Err(MailError::transmission(e.to_string()));
        }

        tracing::info!(
            to = %to,
            template = %message.template_name(),
            "Email delivered"
        );

        Ok(())
    }
}
