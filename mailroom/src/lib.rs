//! mailroom: notification composition and delivery
//!
//! Turns application events (book approved, password reset, email change,
//! ...) into rendered HTML emails and dispatches them through a transport
//! selected by configuration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mailroom::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     mailroom::observability::init(&Default::default())?;
//!
//!     // Built once at bring-up and shared with every component that sends mail
//!     let dispatcher = Dispatcher::new(&MailroomConfig::load()?)?;
//!
//!     dispatcher
//!         .send(
//!             "alice@example.com",
//!             BookApproved {
//!                 book_name: "Go in Action".to_string(),
//!                 username: "alice".to_string(),
//!                 public_id: "abc123".to_string(),
//!             },
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Transports
//!
//! - `smtp` - deliver through the configured relay
//! - `test` - capture messages in memory; read them back with
//!   [`Dispatcher::load_captured`](email::Dispatcher::load_captured)

pub mod config;
pub mod email;
pub mod observability;
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use mailroom::prelude::*;
    //! ```

    pub use crate::config::{EmailSettings, MailroomConfig};

    pub use crate::email::{
        BookApproved, BookRejected, ChangesApproved, ChangesRejected, Composer, ConfirmEmail,
        ConfirmEmailChange, Dispatcher, Driver, MailError, PasswordResetRequest, ResolveError,
        Site, Variables,
    };
}
