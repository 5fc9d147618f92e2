use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod fetch;
pub mod send;
pub mod serve;

use crate::core::AppConfig;
use crate::mail;

#[derive(Subcommand)]
enum Command {
    /// Print recent emails from allow-listed senders
    Fetch {
        /// Maximum number of emails to retrieve
        #[arg(default_value_t = mail::DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..=mail::MAX_LIMIT as i64))]
        limit: u32,

        /// Number of recent days to check
        #[arg(default_value_t = mail::DEFAULT_DAYS, value_parser = clap::value_parser!(u32).range(1..=mail::MAX_DAYS as i64))]
        days: u32,
    },
    /// Send an email to an allow-listed recipient
    Send {
        /// Recipient address, must be on the allow-list
        #[arg(long)]
        to: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        body: String,

        /// File to attach; repeat for multiple attachments
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5030")]
        port: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();
    let config = AppConfig::from_env();

    // Handle each sub command
    match args.command {
        Some(Command::Fetch { limit, days }) => {
            fetch::run(&config, limit, days).await?;
        }
        Some(Command::Send {
            to,
            subject,
            body,
            attachments,
        }) => {
            send::run(&config, to, subject, body, attachments).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        // Bare invocation behaves like `fetch` with defaults
        None => {
            fetch::run(&config, mail::DEFAULT_LIMIT, mail::DEFAULT_DAYS).await?;
        }
    }

    Ok(())
}
