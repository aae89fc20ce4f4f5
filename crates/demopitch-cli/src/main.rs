use anyhow::Result;
use demopitch_cli::cli::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    cli().await
}
