use anyhow::Result;
use mailgate::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
