//! Notification emails: composition, rendering and delivery
//!
//! This module provides:
//! - Message descriptors ([`Composer`]) for every notification the backend sends
//! - A two-stage renderer (content template wrapped in a shared layout)
//! - Two transports: SMTP for production, an in-memory capture for tests
//! - A [`Dispatcher`] that resolves the configured transport once and routes
//!   every send to it
//!
//! # Examples
//!
//! ## Sending a notification
//!
//! ```rust,no_run
//! use mailroom::config::MailroomConfig;
//! use mailroom::email::{Dispatcher, PasswordResetRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(&MailroomConfig::load()?)?;
//!
//! dispatcher
//!     .send(
//!         "alice@example.com",
//!         PasswordResetRequest {
//!             username: "alice".to_string(),
//!             token: "0f3c9a".to_string(),
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting captured messages
//!
//! With `driver = "test"` nothing leaves the process:
//!
//! ```rust
//! use mailroom::config::MailroomConfig;
//! use mailroom::email::{Dispatcher, PasswordResetRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = MailroomConfig::default();
//! config.email.driver = "test".to_string();
//! let dispatcher = Dispatcher::new(&config)?;
//!
//! dispatcher
//!     .send(
//!         "alice@example.com",
//!         PasswordResetRequest {
//!             username: "alice".to_string(),
//!             token: "0f3c9a".to_string(),
//!         },
//!     )
//!     .await?;
//!
//! let message = dispatcher.load_captured("alice@example.com")?;
//! assert_eq!(message.template_name(), "password_reset");
//! # Ok(())
//! # }
//! ```

mod composer;
mod dispatcher;
mod error;
mod messages;
mod renderer;
mod site;
pub mod transport;

pub use composer::{vars, Composer, Variables};
pub use dispatcher::{DefaultTransportFactory, Dispatcher, TransportFactory};
pub use error::{MailError, ResolveError};
pub use messages::{
    BookApproved, BookRejected, ChangesApproved, ChangesRejected, ConfirmEmail,
    ConfirmEmailChange, PasswordResetRequest,
};
pub use renderer::{Renderer, LAYOUT_TEMPLATE, TEMPLATE_SOURCES};
pub use site::Site;
pub use transport::{ActiveTransport, CaptureTransport, Driver, SmtpTransport, Transport};
