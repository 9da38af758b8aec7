//! Notification dispatch demo
//!
//! Sends a few notifications through the capture transport, reads them back
//! and prints the rendered HTML of one of them.
//!
//! Run with: `cargo run --example dispatch`

use mailroom::email::{
    BookApproved, ChangesRejected, Dispatcher, MailError, PasswordResetRequest,
};
use mailroom::testing::capture_config;

#[tokio::main]
async fn main() -> Result<(), MailError> {
    let dispatcher = Dispatcher::new(&capture_config())?;

    dispatcher
        .send(
            "alice@example.com",
            BookApproved {
                book_name: "Go in Action".to_string(),
                username: "alice".to_string(),
                public_id: "abc123".to_string(),
            },
        )
        .await?;

    dispatcher
        .send(
            "bob@example.com",
            ChangesRejected {
                username: "bob".to_string(),
                entity_title: "The Go Programming Language".to_string(),
                note: "Please cite a source for the new edition date".to_string(),
                view_url: "/books/gopl/".to_string(),
            },
        )
        .await?;

    dispatcher
        .send(
            "carol@example.com",
            PasswordResetRequest {
                username: "carol".to_string(),
                token: "5eed42".to_string(),
            },
        )
        .await?;

    if let Some(capture) = dispatcher.captured() {
        for to in capture.recipients() {
            let message = dispatcher.load_captured(&to)?;
            println!("{to:<20} {:<20} {}", message.template_name(), message.subject());
        }
    }

    let message = dispatcher.load_captured("alice@example.com")?;
    println!("\n{}", dispatcher.renderer().render(message.as_ref())?);

    Ok(())
}
