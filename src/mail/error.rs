use thiserror::Error;

/// Failures the mail pipelines can report. Authentication, network,
/// and TLS problems all fold into `Connection` since none of them is
/// retried and callers recover from them the same way.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("EMAIL_SENDER or EMAIL_PASSWORD environment variables not set")]
    ConfigurationMissing,
    #[error("failed to reach the mail server: {0}")]
    Connection(String),
    #[error("failed to decode message: {0}")]
    Decode(String),
}
