//! Public types for the send API
use serde::Deserialize;

pub use crate::mail::SendResult;

/// Request to send an email to an allow-listed recipient
#[derive(Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Local file paths to attach; missing files are skipped
    #[serde(default)]
    pub attachments: Vec<String>,
}
