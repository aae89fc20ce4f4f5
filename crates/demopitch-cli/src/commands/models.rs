use anyhow::{bail, Result};
use console::style;
use demopitch::config::Config;
use demopitch::providers::google::GOOGLE_DOC_URL;
use demopitch::providers::{ApiRevision, GenerativeApi, GoogleClient};

use super::resolve_api_key;

pub async fn handle_models(revision: ApiRevision, api_key: Option<String>) -> Result<()> {
    let config = Config::global();
    let api_key = resolve_api_key(config, api_key);
    if api_key.trim().is_empty() {
        bail!("no Gemini API key found. Set GOOGLE_API_KEY or pass --api-key");
    }

    let client = GoogleClient::from_config(config)?;
    let models = client.list_models(api_key.trim(), revision).await?;

    println!(
        "{}",
        style(format!("Models on {} ({}):", revision, client.host()))
            .cyan()
            .bold()
    );
    if models.is_empty() {
        println!("  No models listed. See {}", GOOGLE_DOC_URL);
    }
    for model in models {
        println!("  {}", model);
    }
    Ok(())
}
