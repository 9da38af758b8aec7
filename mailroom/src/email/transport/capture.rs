//! In-memory capture transport
//!
//! Records the last message sent to each recipient instead of delivering it,
//! so calling code can assert what would have been sent without a relay or
//! rendering cost.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::Transport;
use crate::email::{Composer, MailError};

/// Capture store keyed by recipient address
///
/// Repeated sends to the same recipient overwrite the previous message.
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct CaptureTransport {
    messages: Arc<RwLock<HashMap<String, Arc<dyn Composer>>>>,
}

impl CaptureTransport {
    /// Create an empty capture store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last message captured for `to`
    #[must_use]
    pub fn load(&self, to: &str) -> Option<Arc<dyn Composer>> {
        self.messages.read().get(to).cloned()
    }

    /// Recipients with a captured message, sorted
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        let mut recipients: Vec<_> = self.messages.read().keys().cloned().collect();
        recipients.sort();
        recipients
    }

    /// Number of recipients with a captured message
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Whether nothing has been captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Forget every captured message
    pub fn clear(&self) {
        self.messages.write().clear();
    }
}

#[async_trait]
impl Transport for CaptureTransport {
    async fn send(&self, to: &str, message: Arc<dyn Composer>) -> Result<(), MailError> {
        tracing::debug!(
            to = %to,
            template = %message.template_name(),
            "Email captured"
        );

        self.messages.write().insert(to.to_string(), message);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{BookRejected, PasswordResetRequest};

    fn reset(token: &str) -> Arc<dyn Composer> {
        Arc::new(PasswordResetRequest {
            username: "alice".to_string(),
            token: token.to_string(),
        })
    }

    #[tokio::test]
    async fn test_capture_send_and_load() {
        let capture = CaptureTransport::new();

        capture.send("alice@example.com", reset("one")).await.unwrap();

        let message = capture.load("alice@example.com").unwrap();
        assert_eq!(message.template_name(), "password_reset");
        assert_eq!(capture.len(), 1);
        assert!(capture.load("bob@example.com").is_none());
    }

    #[tokio::test]
    async fn test_capture_last_write_wins() {
        let capture = CaptureTransport::new();

        capture.send("alice@example.com", reset("one")).await.unwrap();
        capture
            .send(
                "alice@example.com",
                Arc::new(BookRejected {
                    note: "Off topic".to_string(),
                    book_name: "Cooking".to_string(),
                    username: "alice".to_string(),
                }),
            )
            .await
            .unwrap();

        assert_eq!(capture.len(), 1);
        let message = capture.load("alice@example.com").unwrap();
        assert_eq!(message.template_name(), "book_rejected");
    }

    #[tokio::test]
    async fn test_capture_clones_share_store() {
        let capture = CaptureTransport::new();
        let other = capture.clone();

        other.send("bob@example.com", reset("two")).await.unwrap();

        assert_eq!(capture.recipients(), vec!["bob@example.com"]);
        capture.clear();
        assert!(other.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_capture_concurrent_writers() {
        let capture = CaptureTransport::new();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let capture = capture.clone();
                tokio::spawn(async move {
                    let to = format!("user{}@example.com", i % 8);
                    capture.send(&to, reset(&i.to_string())).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(capture.len(), 8);
    }
}
