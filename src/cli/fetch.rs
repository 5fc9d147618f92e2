use anyhow::Result;

use crate::core::AppConfig;
use crate::mail;

/// Fetch recent messages from allow-listed senders and print them to
/// standard output. Unlike the HTTP surface, an unreachable mailbox is
/// reported as an error instead of an empty listing.
pub async fn run(config: &AppConfig, limit: u32, days: u32) -> Result<()> {
    let emails = mail::fetch_recent(config, limit, days).await?;

    if emails.is_empty() {
        println!("No emails found from allowed senders.");
        return Ok(());
    }

    println!("Found {} emails from allowed senders:", emails.len());
    println!("{}", "=".repeat(50));
    for (i, email) in emails.iter().enumerate() {
        println!("{}. Subject: {}", i + 1, email.subject);
        println!("   From: {}", email.sender);
        println!("   Date: {}", email.date.as_deref().unwrap_or("(unknown)"));
        println!("   Body Preview: {}", email.body);
        println!("{}", "-".repeat(30));
    }

    Ok(())
}
