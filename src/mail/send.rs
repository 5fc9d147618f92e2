//! Send pipeline: allow-list check, multipart message build, delivery.

use std::path::{Path, PathBuf};

use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use serde::Serialize;

use crate::core::AppConfig;
use crate::mail::transport::MailTransport;

/// Display name on outbound messages.
const FROM_NAME: &str = "Mailgate Email Service";

/// An outbound request. Validated against the allow-list before any
/// transport work happens.
#[derive(Clone, Debug)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Local files to attach; missing ones are skipped with a warning
    pub attachments: Vec<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SendResult {
    pub success: bool,
    pub message: String,
}

impl SendResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Send one email to an allow-listed recipient. A recipient outside the
/// allow-list is rejected before the transport is touched. Rejections
/// and transport failures are both carried in the returned
/// `SendResult`; nothing is retried.
pub async fn send_email(
    config: &AppConfig,
    mailer: &dyn MailTransport,
    request: &OutboundEmail,
) -> SendResult {
    if !config.allowed_senders.is_allowed(&request.to) {
        return SendResult::failure(format!(
            "Email recipient '{}' is not in the allowed list.",
            request.to
        ));
    }

    let Ok((account, _)) = config.credentials() else {
        return SendResult::failure(
            "EMAIL_SENDER or EMAIL_PASSWORD environment variables not set.",
        );
    };

    let message = match build_message(&account, request) {
        Ok(message) => message,
        Err(error) => return SendResult::failure(format!("Failed to build email: {error}")),
    };

    match mailer.deliver(message).await {
        Ok(()) => SendResult {
            success: true,
            message: format!("Email sent successfully to {}", request.to),
        },
        Err(error) => SendResult::failure(format!("Failed to send email: {error}")),
    }
}

/// Build the multipart message: plain-text body always, one part per
/// readable attachment.
fn build_message(account: &str, request: &OutboundEmail) -> anyhow::Result<Message> {
    let from = Mailbox::new(Some(FROM_NAME.to_string()), account.parse()?);
    let to: Mailbox = request.to.parse()?;

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(request.body.clone()));
    for path in &request.attachments {
        if let Some(part) = attachment_part(path) {
            multipart = multipart.singlepart(part);
        }
    }

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(request.subject.clone())
        .multipart(multipart)?)
}

/// Read one attachment into a named part with attachment disposition.
/// Missing or unreadable files are skipped with a warning rather than
/// failing the whole send.
fn attachment_part(path: &Path) -> Option<SinglePart> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "attachment not found, skipping");
        return None;
    }
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to read attachment, skipping");
            return None;
        }
    };
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    let content_type = ContentType::parse(guess_mime(path)).unwrap_or(ContentType::TEXT_PLAIN);
    Some(Attachment::new(filename).body(data, content_type))
}

/// Guess a MIME type from the file extension, defaulting to a generic
/// binary type.
fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "txt" => "text/plain",
        "csv" => "text/csv",
        "htm" | "html" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
