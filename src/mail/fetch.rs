//! Retrieval pipeline: search the inbox by date, fetch a bounded window
//! of messages, and keep only those from allow-listed senders.

use chrono::{Duration, Local};
use mailparse::MailHeaderMap;
use serde::{Deserialize, Serialize};

use crate::core::AppConfig;
use crate::mail::allowlist::AllowList;
use crate::mail::error::MailError;
use crate::mail::extract;
use crate::mail::transport::open_inbound_session;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_DAYS: u32 = 7;
pub const MAX_DAYS: u32 = 30;

/// A fetched message from an allow-listed sender.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InboundEmail {
    /// Provider-assigned message identifier (IMAP UID)
    pub id: String,
    pub subject: String,
    /// Bare sender address, always on the allow-list
    pub sender: String,
    /// Original `Date` header, when present
    pub date: Option<String>,
    /// Plain-text body, truncated to a 500 character preview
    pub body: String,
}

/// Fetch up to `limit` messages received in the last `days` days,
/// newest first, keeping only allow-listed senders. Bounds on `limit`
/// and `days` are enforced by the callers before the pipeline runs.
///
/// Errors carry the reason the mailbox could not be read at all
/// (missing credentials, unreachable server); callers decide whether to
/// degrade to an empty result. Problems with individual messages never
/// error, they are logged and skipped.
///
/// The mailbox client is blocking I/O, so the work runs on the blocking
/// thread pool. Each invocation opens and closes its own session.
pub async fn fetch_recent(
    config: &AppConfig,
    limit: u32,
    days: u32,
) -> Result<Vec<InboundEmail>, MailError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || fetch_recent_blocking(&config, limit, days))
        .await
        .map_err(|error| MailError::Connection(format!("retrieval task failed: {error}")))?
}

fn fetch_recent_blocking(
    config: &AppConfig,
    limit: u32,
    days: u32,
) -> Result<Vec<InboundEmail>, MailError> {
    let mut session = open_inbound_session(config)?;

    // Server-side date filter, day granularity
    let since = (Local::now() - Duration::days(days as i64)).format("%d-%b-%Y");
    let uids = session.uid_search(&format!("SINCE {since}"))?;
    let selected = select_recent(uids, limit as usize);

    let mut emails = Vec::with_capacity(selected.len());
    for uid in selected {
        // One bad message never aborts the rest of the window
        let raw = match session.fetch_raw(uid) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::warn!(uid, "fetched message had no body");
                continue;
            }
            Err(error) => {
                tracing::warn!(uid, %error, "failed to fetch message");
                continue;
            }
        };
        match decode_message(&raw, uid, &config.allowed_senders) {
            Ok(Some(email)) => emails.push(email),
            Ok(None) => {}
            Err(error) => tracing::warn!(uid, %error, "skipping undecodable message"),
        }
    }

    Ok(emails)
}

/// Keep the highest `limit` UIDs, ordered newest-first. UIDs are
/// assigned in increasing order, so the highest ones are the most
/// recently delivered.
fn select_recent(mut uids: Vec<u32>, limit: usize) -> Vec<u32> {
    uids.sort_unstable();
    if uids.len() > limit {
        uids.drain(..uids.len() - limit);
    }
    uids.reverse();
    uids
}

/// Decode one fetched message. `None` when the sender is not on the
/// allow-list or no address could be parsed from the `From` header.
fn decode_message(
    raw: &[u8],
    uid: u32,
    allowed: &AllowList,
) -> Result<Option<InboundEmail>, MailError> {
    let parsed = mailparse::parse_mail(raw).map_err(decode_error)?;

    let from = parsed.headers.get_first_value("From").unwrap_or_default();
    let Some(sender) = extract::sender_address(&from) else {
        return Ok(None);
    };
    if !allowed.is_allowed(&sender) {
        return Ok(None);
    }

    // `get_first_value` already decodes RFC 2047 encoded words
    let subject = parsed
        .headers
        .get_first_value("Subject")
        .unwrap_or_default();
    let date = parsed.headers.get_first_value("Date");
    let body = extract::plain_text_body(&parsed).map_err(decode_error)?;

    Ok(Some(InboundEmail {
        id: uid.to_string(),
        subject,
        sender,
        date,
        body: extract::truncate_preview(&body),
    }))
}

fn decode_error(error: mailparse::MailParseError) -> MailError {
    MailError::Decode(error.to_string())
}
