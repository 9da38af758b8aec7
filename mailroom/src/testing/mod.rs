//! Testing utilities for code that sends notifications
//!
//! Build a dispatcher from [`capture_config`] and read back what would have
//! been delivered:
//!
//! ```rust
//! use mailroom::email::{Dispatcher, PasswordResetRequest};
//! use mailroom::testing::{capture_config, captured_variables};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(&capture_config())?;
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
//! let variables = captured_variables(&dispatcher, "alice@example.com")?;
//! assert_eq!(variables["token"].as_str(), Some("0f3c9a"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::MailroomConfig;
use crate::email::{Composer, Dispatcher, Driver, MailError, Variables};

/// Base URL used by [`capture_config`]
pub const TEST_SERVER_ADDR: &str = "https://gopl.test/";

/// Configuration selecting the capture transport
#[must_use]
pub fn capture_config() -> MailroomConfig {
    let mut config = MailroomConfig::default();
    config.email.driver = Driver::Capture.as_str().to_string();
    config.server.addr = TEST_SERVER_ADDR.to_string();
    config
}

/// Variables of the message last captured for `to`
///
/// # Errors
///
/// Returns the error of [`Dispatcher::load_captured`].
pub fn captured_variables(dispatcher: &Dispatcher, to: &str) -> Result<Variables, MailError> {
    let message = dispatcher.load_captured(to)?;
    Ok(message.variables(dispatcher.renderer().site()))
}

/// Assert that a message rendered with `template_name` was captured for `to`
///
/// # Panics
///
/// Panics if nothing was captured for `to` or the template differs.
pub fn assert_captured(dispatcher: &Dispatcher, to: &str, template_name: &str) -> Arc<dyn Composer> {
    let message = dispatcher
        .load_captured(to)
        .unwrap_or_else(|e| panic!("expected an email for {to}: {e}"));
    assert_eq!(
        message.template_name(),
        template_name,
        "Expected {template_name} email for {to}, got {}",
        message.template_name()
    );
    message
}
