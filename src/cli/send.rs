use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::core::AppConfig;
use crate::mail::{self, OutboundEmail, SmtpMailer};

/// Send one email from the command line and print the outcome.
pub async fn run(
    config: &AppConfig,
    to: String,
    subject: String,
    body: String,
    attachments: Vec<PathBuf>,
) -> Result<()> {
    let mailer = SmtpMailer::new(config);
    let request = OutboundEmail {
        to,
        subject,
        body,
        attachments,
    };

    let result = mail::send_email(config, &mailer, &request).await;
    if result.success {
        println!("{}", result.message);
        Ok(())
    } else {
        bail!(result.message)
    }
}
