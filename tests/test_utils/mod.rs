//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use lettre::Message;

use mailgate::api::{AppState, app};
use mailgate::core::AppConfig;
use mailgate::mail::{AllowList, MailError, MailTransport};

/// Records deliveries instead of opening SMTP sessions so tests can
/// assert whether the transport was invoked at all.
pub struct RecordingMailer {
    sent: Mutex<Vec<Message>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A transport whose deliveries always fail, for exercising the
    /// transport-error path.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message);
        if self.fail {
            return Err(MailError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Config pointing at an unreachable mailbox so retrieval fails fast
/// and tests exercise the degraded path deterministically.
pub fn test_config() -> AppConfig {
    AppConfig {
        account: "939342547@qq.com".to_string(),
        password: Some("test-password".to_string()),
        imap_host: "127.0.0.1".to_string(),
        imap_port: 1,
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 1,
        allowed_senders: AllowList::new([
            "939342547@qq.com",
            "1119623207@qq.com",
            "jiangjimjim@gmail.com",
        ]),
    }
}

/// Creates a test application router wired to the given transport.
pub fn test_app_with_mailer(mailer: Arc<RecordingMailer>) -> Router {
    let transport: Arc<dyn MailTransport> = mailer;
    let app_state = AppState::new(test_config(), transport);
    app(Arc::new(RwLock::new(app_state)))
}

/// Creates a test application router with a recording mail transport.
pub fn test_app() -> (Router, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::new());
    (test_app_with_mailer(Arc::clone(&mailer)), mailer)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
