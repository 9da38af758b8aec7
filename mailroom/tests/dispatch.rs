//! Integration tests for transport resolution and the capture accessor

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mailroom::config::{EmailSettings, MailroomConfig};
use mailroom::email::{
    ActiveTransport, BookApproved, CaptureTransport, Composer, ConfirmEmail, DefaultTransportFactory,
    Dispatcher, Driver, MailError, PasswordResetRequest, Renderer, ResolveError, TransportFactory,
};
use mailroom::testing::{assert_captured, capture_config, captured_variables};

/// Counts constructor invocations, delegating to the bundled factory
#[derive(Default)]
struct CountingFactory {
    builds: AtomicUsize,
}

impl TransportFactory for CountingFactory {
    fn build(
        &self,
        driver: Driver,
        settings: &EmailSettings,
        renderer: Arc<Renderer>,
    ) -> Result<ActiveTransport, ResolveError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        DefaultTransportFactory.build(driver, settings, renderer)
    }
}

fn book_approved() -> BookApproved {
    BookApproved {
        book_name: "Go in Action".to_string(),
        username: "alice".to_string(),
        public_id: "abc123".to_string(),
    }
}

fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_capture_round_trip() {
    let dispatcher = Dispatcher::new(&capture_config()).unwrap();
    let sent = book_approved();

    dispatcher.send("alice@example.com", sent.clone()).await.unwrap();

    let captured = assert_captured(&dispatcher, "alice@example.com", "book_approved");
    let site = dispatcher.renderer().site();
    assert_eq!(captured.subject(), sent.subject());
    assert_eq!(captured.template_name(), sent.template_name());
    assert_eq!(captured.variables(site), sent.variables(site));
    assert_eq!(
        captured_variables(&dispatcher, "alice@example.com").unwrap()["view_book_url"].as_str(),
        Some("https://gopl.test/books/abc123/")
    );
}

#[tokio::test]
async fn test_capture_keeps_last_message_only() {
    let dispatcher = Dispatcher::new(&capture_config()).unwrap();

    dispatcher.send("alice@example.com", book_approved()).await.unwrap();
    dispatcher
        .send(
            "alice@example.com",
            PasswordResetRequest {
                username: "alice".to_string(),
                token: "second".to_string(),
            },
        )
        .await
        .unwrap();

    assert_captured(&dispatcher, "alice@example.com", "password_reset");
    let variables = captured_variables(&dispatcher, "alice@example.com").unwrap();
    assert_eq!(variables["token"].as_str(), Some("second"));
    assert_eq!(dispatcher.captured().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeated_reads_do_not_consume() {
    let dispatcher = Dispatcher::new(&capture_config()).unwrap();
    dispatcher.send("alice@example.com", book_approved()).await.unwrap();

    for _ in 0..3 {
        assert!(dispatcher.load_captured("alice@example.com").is_ok());
    }
}

#[tokio::test]
async fn test_capture_clear_between_runs() {
    let dispatcher = Dispatcher::new(&capture_config()).unwrap();
    dispatcher.send("alice@example.com", book_approved()).await.unwrap();

    dispatcher.captured().unwrap().clear();

    assert!(matches!(
        dispatcher.load_captured("alice@example.com"),
        Err(MailError::NotCaptured(to)) if to == "alice@example.com"
    ));
}

#[tokio::test]
async fn test_load_captured_unknown_recipient() {
    let dispatcher = Dispatcher::new(&capture_config()).unwrap();
    dispatcher.send("alice@example.com", book_approved()).await.unwrap();

    assert!(matches!(
        dispatcher.load_captured("bob@example.com"),
        Err(MailError::NotCaptured(to)) if to == "bob@example.com"
    ));
}

#[tokio::test]
async fn test_load_captured_before_any_send() {
    let dispatcher = Dispatcher::new(&capture_config()).unwrap();

    assert!(matches!(
        dispatcher.load_captured("alice@example.com"),
        Err(MailError::NotResolved)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unknown_driver_fails_identically_for_all_callers() {
    let mut config = capture_config();
    config.email.driver = "carrier-pigeon".to_string();
    let factory = Arc::new(CountingFactory::default());
    let dispatcher = Arc::new(Dispatcher::with_factory(&config, factory.clone()).unwrap());

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                dispatcher
                    .send(
                        &format!("user{i}@example.com"),
                        ConfirmEmail {
                            username: format!("user{i}"),
                            email: format!("user{i}@example.com"),
                            code: "000000".to_string(),
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        match handle.await.unwrap() {
            Err(MailError::Resolve(err)) => {
                assert_eq!(err, ResolveError::UnknownDriver("carrier-pigeon".to_string()));
            }
            other => panic!("expected a resolution error, got {other:?}"),
        }
    }

    assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    assert!(dispatcher.driver().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_transport_is_built_once_under_contention() {
    let factory = Arc::new(CountingFactory::default());
    let dispatcher =
        Arc::new(Dispatcher::with_factory(&capture_config(), factory.clone()).unwrap());

    let handles: Vec<_> = (0..24)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                dispatcher
                    .send(&format!("user{i}@example.com"), book_approved())
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(factory.builds.load(Ordering::SeqCst), 1);
    assert_eq!(dispatcher.captured().unwrap().len(), 24);
}

#[tokio::test]
async fn test_relay_failure_is_reported() {
    let mut config = MailroomConfig::default();
    config.email.driver = "smtp".to_string();
    config.email.host = "127.0.0.1".to_string();
    config.email.port = unused_port();
    config.email.tls = false;
    config.email.from = "noreply@gopl.dev".to_string();
    let dispatcher = Dispatcher::new(&config).unwrap();

    let result = dispatcher.send("alice@example.com", book_approved()).await;

    assert!(matches!(result, Err(MailError::Transmission(_))), "got {result:?}");
    assert_eq!(dispatcher.driver(), Some(Driver::Smtp));
    assert!(dispatcher.captured().is_none());
    assert!(matches!(
        dispatcher.load_captured("alice@example.com"),
        Err(MailError::NotCaptureTransport)
    ));
}

#[tokio::test]
async fn test_standalone_capture_transport() {
    use mailroom::email::Transport;

    let capture = CaptureTransport::new();
    let message: Arc<dyn Composer> = Arc::new(book_approved());

    capture.send("alice@example.com", message).await.unwrap();

    assert_eq!(capture.recipients(), vec!["alice@example.com"]);
}
