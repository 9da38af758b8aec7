//! Transport resolution and send routing
//!
//! A [`Dispatcher`] is built once at process bring-up and handed to every
//! component that sends notifications. The transport behind it is resolved
//! lazily on the first send, exactly once: concurrent first callers wait for
//! the single resolution, and its outcome (transport or error) is kept for
//! the lifetime of the dispatcher.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::transport::{ActiveTransport, CaptureTransport, Driver, SmtpTransport, Transport};
use super::{Composer, MailError, Renderer, ResolveError};
use crate::config::{EmailSettings, MailroomConfig};

/// Builds the transport for a recognized driver
#[cfg_attr(test, mockall::automock)]
pub trait TransportFactory: Send + Sync {
    /// Construct the transport for `driver`
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` if the transport cannot be built from `settings`
    fn build(
        &self,
        driver: Driver,
        settings: &EmailSettings,
        renderer: Arc<Renderer>,
    ) -> Result<ActiveTransport, ResolveError>;
}

/// Builds the bundled SMTP and capture transports
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransportFactory;

impl TransportFactory for DefaultTransportFactory {
    fn build(
        &self,
        driver: Driver,
        settings: &EmailSettings,
        renderer: Arc<Renderer>,
    ) -> Result<ActiveTransport, ResolveError> {
        match driver {
            Driver::Smtp => SmtpTransport::new(settings, renderer).map(ActiveTransport::Smtp),
            Driver::Capture => Ok(ActiveTransport::Capture(CaptureTransport::new())),
        }
    }
}

/// Entry point for sending notifications
///
/// # Examples
///
/// ```rust,no_run
/// use mailroom::config::MailroomConfig;
/// use mailroom::email::{BookApproved, Dispatcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = Dispatcher::new(&MailroomConfig::load()?)?;
///
/// dispatcher
///     .send(
///         "alice@example.com",
///         BookApproved {
///             book_name: "Go in Action".to_string(),
///             username: "alice".to_string(),
///             public_id: "abc123".to_string(),
///         },
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher {
    settings: EmailSettings,
    renderer: Arc<Renderer>,
    factory: Arc<dyn TransportFactory>,
    transport: OnceCell<Result<ActiveTransport, ResolveError>>,
}

impl Dispatcher {
    /// Create a dispatcher with the bundled transports
    ///
    /// Compiles the template set immediately; the transport itself is only
    /// resolved on first send.
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the bundled templates fail to compile.
    pub fn new(config: &MailroomConfig) -> Result<Self, MailError> {
        Self::with_factory(config, Arc::new(DefaultTransportFactory))
    }

    /// Create a dispatcher that builds its transport through `factory`
    ///
    /// # Errors
    ///
    /// Returns `MailError` if the bundled templates fail to compile.
    pub fn with_factory(
        config: &MailroomConfig,
        factory: Arc<dyn TransportFactory>,
    ) -> Result<Self, MailError> {
        let renderer = Renderer::new(config.site())?;

        Ok(Self {
            settings: config.email.clone(),
            renderer: Arc::new(renderer),
            factory,
            transport: OnceCell::new(),
        })
    }

    /// Send `message` to `to` through the active transport
    ///
    /// The first call resolves the transport. A resolution failure is
    /// returned to that call and to every later one.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Resolve` if the transport cannot be resolved, or
    /// the transport's own error if delivery fails.
    pub async fn send<C>(&self, to: &str, message: C) -> Result<(), MailError>
    where
        C: Composer + 'static,
    {
        self.send_shared(to, Arc::new(message)).await
    }

    /// Send an already shared message
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::send`].
    pub async fn send_shared(&self, to: &str, message: Arc<dyn Composer>) -> Result<(), MailError> {
        let transport = self.resolve().await?;

        tracing::debug!(
            to = %to,
            driver = %transport.driver(),
            template = %message.template_name(),
            "Dispatching email"
        );

        transport.send(to, message).await
    }

    /// Last message captured for `to`
    ///
    /// # Errors
    ///
    /// - [`MailError::NotResolved`] before the first send
    /// - [`MailError::Resolve`] if resolution failed
    /// - [`MailError::NotCaptureTransport`] if the active transport is SMTP
    /// - [`MailError::NotCaptured`] if nothing was sent to `to`
    pub fn load_captured(&self, to: &str) -> Result<Arc<dyn Composer>, MailError> {
        let capture = self.resolved()?.as_capture().ok_or(MailError::NotCaptureTransport)?;

        capture
            .load(to)
            .ok_or_else(|| MailError::NotCaptured(to.to_string()))
    }

    /// The capture store, if the capture transport is active
    #[must_use]
    pub fn captured(&self) -> Option<&CaptureTransport> {
        self.resolved().ok().and_then(ActiveTransport::as_capture)
    }

    /// Driver of the resolved transport, if resolution succeeded
    #[must_use]
    pub fn driver(&self) -> Option<Driver> {
        self.resolved().ok().map(ActiveTransport::driver)
    }

    /// Compiled template set
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    async fn resolve(&self) -> Result<&ActiveTransport, MailError> {
        self.transport
            .get_or_init(|| async { self.build_transport() })
            .await
            .as_ref()
            .map_err(|e| MailError::Resolve(e.clone()))
    }

    fn resolved(&self) -> Result<&ActiveTransport, MailError> {
        match self.transport.get() {
            None => Err(MailError::NotResolved),
            Some(outcome) => outcome.as_ref().map_err(|e| MailError::Resolve(e.clone())),
        }
    }

    fn build_transport(&self) -> Result<ActiveTransport, ResolveError> {
        let outcome = self
            .settings
            .driver
            .parse::<Driver>()
            .and_then(|driver| {
                self.factory
                    .build(driver, &self.settings, Arc::clone(&self.renderer))
            });

        match &outcome {
            Ok(transport) => {
                tracing::info!(driver = %transport.driver(), "Email transport resolved");
            }
            Err(e) => {
                tracing::error!(
                    driver = %self.settings.driver,
                    error = %e,
                    "Email transport resolution failed"
                );
            }
        }

        outcome
    }
}
