//! Mail domain: allow-list filtering, message extraction, and the
//! retrieval and send pipelines over IMAP/SMTP.

pub mod allowlist;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod send;
pub mod transport;

pub use allowlist::AllowList;
pub use error::MailError;
pub use fetch::{DEFAULT_DAYS, DEFAULT_LIMIT, InboundEmail, MAX_DAYS, MAX_LIMIT, fetch_recent};
pub use send::{OutboundEmail, SendResult, send_email};
pub use transport::{MailTransport, SmtpMailer};
