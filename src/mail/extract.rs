//! Decoding of fetched messages: sender addresses and plain-text bodies.

use mailparse::{DispositionType, MailAddr, ParsedMail};

/// Longest body returned for a single message before the preview is cut.
pub const BODY_PREVIEW_CHARS: usize = 500;
const TRUNCATION_MARKER: &str = "...";

/// Extract the bare address from a `From` header value. Returns `None`
/// when nothing address-like can be found; callers treat that as a
/// non-matching sender rather than an error.
pub fn sender_address(header: &str) -> Option<String> {
    if let Ok(addrs) = mailparse::addrparse(header) {
        for addr in addrs.iter() {
            match addr {
                MailAddr::Single(info) => return Some(info.addr.clone()),
                MailAddr::Group(group) => {
                    if let Some(info) = group.addrs.first() {
                        return Some(info.addr.clone());
                    }
                }
            }
        }
    }

    // Fall back to the literal forms: `Display Name <addr>`, or a bare
    // address possibly wrapped in quotes.
    let header = header.trim();
    if let (Some(start), Some(end)) = (header.find('<'), header.rfind('>'))
        && start < end
    {
        let addr = header[start + 1..end].trim();
        return (!addr.is_empty()).then(|| addr.to_string());
    }
    let addr = header.trim_matches('"').trim();
    (!addr.is_empty()).then(|| addr.to_string())
}

/// Select the message body: the first `text/plain` part that is not an
/// attachment for multipart messages, the decoded single-part payload
/// otherwise. Multipart messages without any plain-text part yield an
/// empty string.
pub fn plain_text_body(message: &ParsedMail<'_>) -> Result<String, mailparse::MailParseError> {
    if message.subparts.is_empty() {
        return message.get_body();
    }
    match first_plain_part(message) {
        Some(part) => part.get_body(),
        None => Ok(String::new()),
    }
}

/// Depth-first walk in structural order.
fn first_plain_part<'a, 'b>(part: &'a ParsedMail<'b>) -> Option<&'a ParsedMail<'b>> {
    if part.subparts.is_empty() {
        let is_attachment = matches!(
            part.get_content_disposition().disposition,
            DispositionType::Attachment
        );
        if !is_attachment && part.ctype.mimetype.eq_ignore_ascii_case("text/plain") {
            return Some(part);
        }
        return None;
    }
    part.subparts.iter().find_map(first_plain_part)
}

/// Cut a body down to the first 500 characters, appending a marker when
/// anything was dropped. Bodies at or under the limit pass through
/// unchanged.
pub fn truncate_preview(body: &str) -> String {
    let mut chars = body.chars();
    let preview: String = chars.by_ref().take(BODY_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}{TRUNCATION_MARKER}")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_address_bracket_form() {
        assert_eq!(
            sender_address("Jim Jiang <jiangjimjim@gmail.com>"),
            Some("jiangjimjim@gmail.com".to_string())
        );
        assert_eq!(
            sender_address("<939342547@qq.com>"),
            Some("939342547@qq.com".to_string())
        );
    }

    #[test]
    fn test_sender_address_bare_and_quoted_forms() {
        assert_eq!(
            sender_address("939342547@qq.com"),
            Some("939342547@qq.com".to_string())
        );
        assert_eq!(
            sender_address("\"jiangjimjim@gmail.com\""),
            Some("jiangjimjim@gmail.com".to_string())
        );
    }

    #[test]
    fn test_sender_address_empty_header() {
        assert_eq!(sender_address(""), None);
        assert_eq!(sender_address("   "), None);
    }

    #[test]
    fn test_plain_text_body_single_part() {
        let raw = b"From: a@b.c\r\nSubject: hi\r\n\r\nplain payload";
        let parsed = mailparse::parse_mail(raw).unwrap();
        assert_eq!(plain_text_body(&parsed).unwrap(), "plain payload");
    }

    #[test]
    fn test_plain_text_body_decodes_transfer_encoding() {
        let raw = b"From: a@b.c\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Transfer-Encoding: quoted-printable\r\n\r\ncaf=C3=A9";
        let parsed = mailparse::parse_mail(raw).unwrap();
        assert_eq!(plain_text_body(&parsed).unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_plain_text_body_skips_html_and_attachment_parts() {
        let raw = b"From: a@b.c\r\nMIME-Version: 1.0\r\nContent-Type: multipart/mixed; boundary=\"xyz\"\r\n\r\n--xyz\r\nContent-Type: text/html\r\n\r\n<p>markup</p>\r\n--xyz\r\nContent-Type: text/plain\r\nContent-Disposition: attachment; filename=\"notes.txt\"\r\n\r\nattached text\r\n--xyz\r\nContent-Type: text/plain\r\n\r\nthe real body\r\n--xyz--\r\n";
        let parsed = mailparse::parse_mail(raw).unwrap();
        assert_eq!(plain_text_body(&parsed).unwrap().trim_end(), "the real body");
    }

    #[test]
    fn test_plain_text_body_empty_when_no_plain_part() {
        let raw = b"From: a@b.c\r\nMIME-Version: 1.0\r\nContent-Type: multipart/alternative; boundary=\"xyz\"\r\n\r\n--xyz\r\nContent-Type: text/html\r\n\r\n<p>only markup</p>\r\n--xyz--\r\n";
        let parsed = mailparse::parse_mail(raw).unwrap();
        assert_eq!(plain_text_body(&parsed).unwrap(), "");
    }

    #[test]
    fn test_truncate_preview_at_limit_unchanged() {
        let body = "a".repeat(BODY_PREVIEW_CHARS);
        assert_eq!(truncate_preview(&body), body);
        assert_eq!(truncate_preview("short"), "short");
        assert_eq!(truncate_preview(""), "");
    }

    #[test]
    fn test_truncate_preview_over_limit_appends_marker() {
        let body = "a".repeat(BODY_PREVIEW_CHARS + 1);
        let preview = truncate_preview(&body);
        assert_eq!(preview.len(), BODY_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..BODY_PREVIEW_CHARS], &body[..BODY_PREVIEW_CHARS]);
    }

    #[test]
    fn test_truncate_preview_counts_characters_not_bytes() {
        let body = "\u{4f60}".repeat(BODY_PREVIEW_CHARS + 10);
        let preview = truncate_preview(&body);
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }
}
