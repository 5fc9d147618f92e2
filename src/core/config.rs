use std::env;

use crate::mail::{AllowList, MailError};

/// Addresses permitted as inbound senders and outbound recipients. The
/// gateway never returns mail from, or sends mail to, anyone else.
pub const ALLOWED_ADDRESSES: [&str; 3] = [
    "939342547@qq.com",
    "1119623207@qq.com",
    "jiangjimjim@gmail.com",
];

const DEFAULT_ACCOUNT: &str = "939342547@qq.com";
const IMAP_HOST: &str = "imap.qq.com";
const IMAP_PORT: u16 = 993;
const DEFAULT_SMTP_HOST: &str = "smtp.qq.com";
const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub account: String,
    pub password: Option<String>,
    pub imap_host: String,
    pub imap_port: u16,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub allowed_senders: AllowList,
}

impl AppConfig {
    /// Build the configuration from the environment. Loaded once at
    /// startup and passed by reference into the pipelines; a missing
    /// password is not an error here, each pipeline call reports it.
    pub fn from_env() -> Self {
        let account = env::var("EMAIL_SENDER").unwrap_or_else(|_| DEFAULT_ACCOUNT.to_string());
        let password = env::var("EMAIL_PASSWORD").ok().filter(|p| !p.is_empty());
        let smtp_host = env::var("SMTP_SERVER").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Self {
            account,
            password,
            imap_host: IMAP_HOST.to_string(),
            imap_port: IMAP_PORT,
            smtp_host,
            smtp_port,
            allowed_senders: AllowList::new(ALLOWED_ADDRESSES),
        }
    }

    /// Account and secret, or the configuration error every pipeline
    /// reports when credentials were never provided.
    pub fn credentials(&self) -> Result<(String, String), MailError> {
        match &self.password {
            Some(password) => Ok((self.account.clone(), password.clone())),
            None => Err(MailError::ConfigurationMissing),
        }
    }
}
