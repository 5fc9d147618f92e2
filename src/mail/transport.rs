//! Session handling against the configured mail provider: TLS IMAP for
//! retrieval, TLS SMTP submission for delivery. Sessions are single-use
//! and scoped to one pipeline invocation; there is no pooling or retry.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::core::AppConfig;
use crate::mail::error::MailError;

type TlsImapSession = imap::Session<native_tls::TlsStream<std::net::TcpStream>>;

/// Authenticated IMAP session with the inbox selected. Logout runs on
/// drop so every exit path, including failures mid-pipeline, closes the
/// server-side session.
pub struct InboxSession {
    session: TlsImapSession,
}

impl InboxSession {
    /// Run a UID search against the selected inbox.
    pub fn uid_search(&mut self, query: &str) -> Result<Vec<u32>, MailError> {
        let uids = self.session.uid_search(query).map_err(connection_error)?;
        Ok(uids.into_iter().collect())
    }

    /// Fetch the full RFC 822 content of one message. `None` when the
    /// server returned no body for the UID.
    pub fn fetch_raw(&mut self, uid: u32) -> Result<Option<Vec<u8>>, MailError> {
        let fetches = self
            .session
            .uid_fetch(uid.to_string(), "RFC822")
            .map_err(connection_error)?;
        Ok(fetches
            .iter()
            .next()
            .and_then(|fetch| fetch.body().map(|raw| raw.to_vec())))
    }
}

impl Drop for InboxSession {
    fn drop(&mut self) {
        if let Err(error) = self.session.logout() {
            tracing::debug!(%error, "IMAP logout failed");
        }
    }
}

/// Open an authenticated TLS session against the configured IMAP server
/// and select the inbox. Network, TLS, and authentication failures all
/// surface as `MailError::Connection`.
pub fn open_inbound_session(config: &AppConfig) -> Result<InboxSession, MailError> {
    let (account, password) = config.credentials()?;

    let tls = native_tls::TlsConnector::builder()
        .build()
        .map_err(connection_error)?;
    let client = imap::connect(
        (config.imap_host.as_str(), config.imap_port),
        config.imap_host.as_str(),
        &tls,
    )
    .map_err(connection_error)?;
    let session = client
        .login(account.as_str(), password.as_str())
        .map_err(|error| connection_error(error.0))?;

    let mut inbox = InboxSession { session };
    inbox.session.select("INBOX").map_err(connection_error)?;
    Ok(inbox)
}

/// Outbound delivery seam. The send pipeline only ever talks to this
/// trait, so tests can substitute a recording stub and assert whether
/// the transport was invoked at all.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver one already-built message over a fresh session.
    async fn deliver(&self, message: Message) -> Result<(), MailError>;
}

/// SMTP submission over implicit TLS, authenticated with the mailbox
/// credentials.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Option<Credentials>,
}

impl SmtpMailer {
    pub fn new(config: &AppConfig) -> Self {
        let credentials = config
            .password
            .as_ref()
            .map(|password| Credentials::new(config.account.clone(), password.clone()));
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            credentials,
        }
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        let credentials = self
            .credentials
            .clone()
            .ok_or(MailError::ConfigurationMissing)?;
        // `relay` wraps the connection in TLS, matching the provider's
        // implicit-TLS submission port.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
            .map_err(connection_error)?
            .port(self.port)
            .credentials(credentials)
            .build();
        transport.send(message).await.map_err(connection_error)?;
        Ok(())
    }
}

fn connection_error(error: impl std::fmt::Display) -> MailError {
    MailError::Connection(error.to_string())
}
