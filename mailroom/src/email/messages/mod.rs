//! Notification types sent by the backend
//!
//! One struct per event. Each implements [`Composer`](super::Composer) and
//! maps one-to-one onto a bundled content template.

mod account;
mod book;
mod changes;

pub use account::{ConfirmEmail, ConfirmEmailChange, PasswordResetRequest};
pub use book::{BookApproved, BookRejected};
pub use changes::{ChangesApproved, ChangesRejected};
